//! Enumerated configuration values.
//!
//! Each enum maps one-to-one onto the kebab-case strings accepted in the
//! config file.

use std::fmt;

use serde::{Serialize, Serializer};

/// Declare a config enum together with its string names.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident default $default:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $s:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The config-file spelling of this value.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $s, )+
                }
            }

            /// Parse the config-file spelling.
            pub fn from_name(s: &str) -> Option<Self> {
                match s {
                    $( $s => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// Allowed spellings joined with `|`, for error messages.
            pub fn allowed() -> String {
                Self::ALL
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join("|")
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

choice_enum! {
    /// Navigation strategy for left/right cycling.
    NavigationMode default Standard {
        /// App ring with pinned apps and per-app window memory.
        Standard => "standard",
        /// Most-recently-used window cycling with a frozen session order.
        MruCycle => "mru-cycle",
    }
}

choice_enum! {
    /// Ordering of apps that are not pinned.
    UnpinnedApps default Append {
        /// Remember first-seen order; append new apps alphabetically.
        Append => "append",
        /// Sort alphabetically on every event.
        AlphabeticalTail => "alphabetical-tail",
        /// Exclude unpinned apps from the ring.
        Ignore => "ignore",
    }
}

choice_enum! {
    /// Which window to pick when switching into an app.
    InAppWindow default LastFocused {
        /// The app's last focused window.
        LastFocused => "last-focused",
        /// The app's last focused window on the current monitor, else its last focused window.
        LastFocusedOnMonitor => "last-focused-on-monitor",
        /// Spatial order only.
        Spatial => "spatial",
    }
}

choice_enum! {
    /// How windows are grouped into ring stops.
    Grouping default OneStopPerApp {
        /// One stop per application.
        OneStopPerApp => "one-stop-per-app",
    }
}

choice_enum! {
    /// Treatment of apps that have no windows.
    ShowWindowlessApps default Show {
        /// Leave them out of the ring.
        Hide => "hide",
        /// Order them like any other app.
        Show => "show",
        /// Put them after the other unpinned apps.
        ShowAtEnd => "show-at-end",
    }
}

choice_enum! {
    /// Log verbosity.
    LogLevel default Info {
        /// Errors only.
        Error => "error",
        /// Warnings and errors.
        Warn => "warn",
        /// Informational messages.
        Info => "info",
        /// Debug detail.
        Debug => "debug",
        /// Everything.
        Trace => "trace",
    }
}

choice_enum! {
    /// ANSI color in log output.
    ColorMode default Auto {
        /// Color when writing to a terminal.
        Auto => "auto",
        /// Always color.
        Always => "always",
        /// Never color.
        Never => "never",
    }
}

choice_enum! {
    /// Vertical placement of the HUD panel.
    HudPosition default MiddleCenter {
        /// Near the top edge.
        TopCenter => "top-center",
        /// Centered.
        MiddleCenter => "middle-center",
        /// Near the bottom edge.
        BottomCenter => "bottom-center",
    }
}
