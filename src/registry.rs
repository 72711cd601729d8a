/// Declares a closed set of named styles.
///
/// Each registry is a plain `Copy` enum with its user-facing name, the full
/// list of variants (so a host UI can offer the valid choices), and a parser
/// that falls back to the registry default for unknown names instead of
/// failing. Serde goes through the same names.
macro_rules! named_registry {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident (default $default:ident) {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every registered variant, in registration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// The variant unknown names resolve to.
            pub const DEFAULT: $name = $name::$default;

            /// The registered name of this variant.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }

            /// All registered names.
            pub fn names() -> impl Iterator<Item = &'static str> {
                Self::ALL.iter().map(|v| v.name())
            }

            /// Exact lookup; `None` for unregistered names.
            pub fn lookup(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.name() == name)
            }

            /// Lookup with the soft fallback to [`Self::DEFAULT`].
            pub fn from_name(name: &str) -> Self {
                Self::lookup(name).unwrap_or_else(|| {
                    log::warn!(
                        "unknown {} {:?}, using {:?}",
                        stringify!($name),
                        name,
                        Self::DEFAULT.name()
                    );
                    Self::DEFAULT
                })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::DEFAULT
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self::from_name(&name)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.name().to_string()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

pub(crate) use named_registry;
