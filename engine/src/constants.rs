/// Environment variable names consulted by the engine.
pub mod env_vars {
    pub const HOME: &str = "HOME";
    pub const XDG_DATA_HOME: &str = "XDG_DATA_HOME";
    pub const XDG_DATA_DIRS: &str = "XDG_DATA_DIRS";
    pub const XDG_CONFIG_HOME: &str = "XDG_CONFIG_HOME";
    pub const XDG_CONFIG_DIRS: &str = "XDG_CONFIG_DIRS";
}

/// XDG defaults, relative to the home directory where noted.
pub mod xdg_defaults {
    /// Relative to `$HOME`.
    pub const DATA_HOME: &str = ".local/share";
    /// Relative to `$HOME`.
    pub const CONFIG_HOME: &str = ".config";
    pub const DATA_DIRS: &str = "/usr/local/share/:/usr/share/";
    pub const CONFIG_DIRS: &str = "/etc/xdg";
}

/// Names of files and directories inside a theme directory.
pub mod theme_files {
    /// Appended to every XDG data directory to form a theme search path.
    pub const DESKTOPTHEME_SUBDIR: &str = "plasma/desktoptheme";
    pub const METADATA_JSON: &str = "metadata.json";
    pub const METADATA_DESKTOP: &str = "metadata.desktop";
    /// Either a color file at the theme root or a directory of color files.
    pub const COLORS: &str = "colors";
    pub const COLORS_EXTENSION: &str = "colors";
    pub const COLORS_GLOB: &str = "*.colors";
}

/// KDE configuration files that name the active theme, relative to the
/// config home.
pub mod kde_config {
    pub const KDEDEFAULTS_PACKAGE: &str = "kdedefaults/package";
    pub const KDEDEFAULTS_KDEGLOBALS: &str = "kdedefaults/kdeglobals";
    pub const KDEGLOBALS: &str = "kdeglobals";
    pub const PLASMARC: &str = "plasmarc";

    pub const PACKAGE_PREFIX: &str = "org.kde.";
    pub const PACKAGE_SUFFIX: &str = ".desktop";
}

/// Maximum directory depth, counted from a search path, at which the scanner
/// still looks for theme directories.
pub const MAX_SCAN_DEPTH: usize = 3;
