pub const HOME_ICON: &str = "i-lucide-house";
pub const EMPTY_ICON: &str = "i-lucide-circle-dashed";

/// Icon for a route whose record carries none. The root route (empty name)
/// gets the home icon.
pub fn default_icon(route_name: &str) -> &'static str {
    match route_name {
        "" | "home" => HOME_ICON,
        "member" => "i-lucide-users",
        "amusement" => "i-lucide-drama",
        "payment" => "i-lucide-credit-card",
        "common" => "i-lucide-layers",
        "marketing" => "i-lucide-megaphone",
        "feed" => "i-lucide-message-square-more",
        "statistics" => "i-lucide-chart-line",
        "system" => "i-lucide-settings",
        "system_menu" => "i-lucide-list-tree",
        "system_role" => "i-lucide-shield-check",
        "system_user" => "i-lucide-user-cog",
        _ => EMPTY_ICON,
    }
}
