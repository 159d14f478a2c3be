// Endpoint path segments, relative to the API prefix. Permission strings in
// the permission group use these same segments.

macro_rules! api_routes {
    ($( $group:literal => { $( $name:ident => $path:literal ),* $(,)? } )*) => {
        $( $( pub const $name: &str = $path; )* )*

        /// Every endpoint as `(group, constant name, path segment)`
        pub const ALL: &[(&str, &str, &str)] = &[
            $( $( ($group, stringify!($name), $path), )* )*
        ];
    };
}

api_routes! {
    "common" => {
        COMMON_UPLOAD => "common-upload",
        COMMON_CONFIG => "common-config",
        COMMON_COINS_LIST => "common-coins",
        COMMON_COINS_ADD => "common-coins-add",
        COMMON_COINS_EDIT => "common-coins-edit",
        COMMON_COINS_REMOVE => "common-coins-remove",
        COMMON_TAG_LIST => "common-tag-list",
        COMMON_TAG_REMOVE => "common-tag-remove",
        COMMON_TAG_ADD => "common-tag-add",
        COMMON_TAG_EDIT => "common-tag-edit",
        COMMON_MODEL_LIST => "common-model-list",
        COMMON_MODEL_EDIT => "common-model-edit",
        COMMON_MODEL_ADD => "common-model-add",
        COMMON_MODEL_PRESET_LIST => "common-model-preset-list",
        COMMON_MODEL_PRESET_EDIT => "common-model-preset-edit",
        COMMON_MODEL_PRESET_ADD => "common-model-preset-add",
        COMMON_MODEL_PRESET_REMOVE => "common-model-preset-remove",
        COMMON_MODEL_TOKEN_LIST => "common-model-token-list",
        COMMON_MODEL_TOKEN_EDIT => "common-model-token-edit",
        COMMON_MODEL_TOKEN_ADD => "common-model-token-add",
        COMMON_MODEL_TOKEN_REMOVE => "common-model-token-remove",
        COMMON_LANG_LIST => "common-language-list",
        COMMON_LANG_ADD => "common-language-add",
        COMMON_LANG_EDIT => "common-language-edit",
        COMMON_LANG_REMOVE => "common-language-remove",
        CONFIG_LIST => "system",
        CONFIG_EDIT => "system-edit",
        COMMON_STATISTICS => "common-statistics",
        COMMON_STATISTICS_REFRESH => "common-statistics-refresh",
        COMMON_INVITE_STATISTICS => "common-invite-statistics",
        COMMON_MESSAGE_LIST => "common-message-list",
        COMMON_MESSAGE_ADD => "common-message-add",
        COMMON_MESSAGE_EDIT => "common-message-edit",
        COMMON_MESSAGE_REMOVE => "common-message-remove",
        COMMON_SENSITIVE_LIST => "common-sensitive-list",
        COMMON_SENSITIVE_ADD => "common-sensitive-add",
        COMMON_SENSITIVE_EDIT => "common-sensitive-edit",
        COMMON_SENSITIVE_REMOVE => "common-sensitive-remove",
        COMMON_FEED_LIST => "common-feed-list",
        COMMON_FEED_EDIT => "common-feed-edit",
        COMMON_FEED_REMOVE => "common-feed-remove",
        COMMON_REPORT_LOG => "common-report-log",
    }
    "member" => {
        MEMBER_LIST => "member-list",
        MEMBER_EDIT => "member-edit",
        MEMBER_BATTERY_EDIT => "member-battery-edit",
        MEMBER_SELECT_LIST => "member-select-list",
        MEMBER_LV_LIST => "member-lv-list",
        MEMBER_LV_EDIT => "member-lv-edit",
        MEMBER_LV_ADD => "member-lv-add",
        MEMBER_COLLECT_LIST => "conduct-collect-list",
        MEMBER_WALLET_LOG_LIST => "member-wallet-log",
        MEMBER_INVITATION_CODE_LIST => "member-invitation-code",
        MEMBER_INVITATION_CODE_GENERATE => "member-invitation-code-generate",
        MEMBER_MARKETING_INVITE_LIST => "member-marketing-invite-list",
        CONDUCT_COMMENT_LIST => "conduct-comment-list",
        CONDUCT_COMMENT_REPLY_LIST => "conduct-comment-reply-list",
        CONDUCT_COMMENT_REMOVE => "conduct-comment-remove",
    }
    "payment" => {
        PAYMENT_LIST => "payment-list",
        PAYMENT_EDIT => "payment-edit",
        PAYMENT_TYPE_LIST => "payment-type-list",
        PAYMENT_TYPE_ADD => "payment-type-add",
        PAYMENT_TYPE_EDIT => "payment-type-edit",
        PAYMENT_TYPE_REMOVE => "payment-type-remove",
        PAYMENT_ORDER_LIST => "payment-order-list",
        PAYMENT_ORDER_EDIT => "payment-order-edit",
    }
    "amusement" => {
        AMUSEMENT_LIST => "amusement-list",
        AMUSEMENT_DETAIL => "amusement-detail",
        AMUSEMENT_ADD => "amusement-add",
        AMUSEMENT_EDIT => "amusement-edit",
        AMUSEMENT_REMOVE => "amusement-remove",
        AMUSEMENT_CATEGORY_LIST => "amusement-category-list",
        AMUSEMENT_CATEGORY_ADD => "amusement-category-add",
        AMUSEMENT_CATEGORY_EDIT => "amusement-category-edit",
        AMUSEMENT_CATEGORY_REMOVE => "amusement-category-remove",
        AMUSEMENT_PARAMETER_LIST => "amusement-parameter-list",
        AMUSEMENT_PARAMETER_ADD => "amusement-parameter-add",
        AMUSEMENT_PARAMETER_EDIT => "amusement-parameter-edit",
        AMUSEMENT_PARAMETER_REMOVE => "amusement-parameter-remove",
    }
    "marketing" => {
        MARKETING_LIST => "marketing-list",
        MARKETING_EDIT => "marketing-edit",
    }
    "account" => {
        ADMIN_LOGIN => "login",
        ADMIN_USER_EDIT => "admin-user-edit",
        ADMIN_ADD => "admin-add",
        ADMIN_EDIT => "admin-edit",
        ADMIN_REMOVE => "admin-remove",
        ADMIN_U => "admin-u",
        ADMIN_LOG => "admin-log",
    }
    "rbac" => {
        RBAC_MENU_LIST => "rbac-menu-list",
        RBAC_MENU_ADD => "rbac-menu-add",
        RBAC_MENU_EDIT => "rbac-menu-edit",
        RBAC_MENU_REMOVE => "rbac-menu-remove",
        RBAC_GROUP_ADD => "rbac-group-add",
        RBAC_GROUP_MENU => "rbac-group-menu",
        RBAC_ADMIN_GROUP => "rbac-admin-group",
    }
}

/// Resolve a constant name (any case, `-` or `_`) or a raw path segment
pub fn lookup(key: &str) -> Option<&'static str> {
    let normalized = key.replace('-', "_").to_ascii_uppercase();
    ALL.iter()
        .find(|(_, name, path)| *path == key || *name == normalized)
        .map(|(_, _, path)| *path)
}
