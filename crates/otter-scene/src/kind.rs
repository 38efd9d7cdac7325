//! The fixed set of viewport and annotation kinds.
//!
//! Scene files name kinds as text. Each name parses into one enumeration
//! variant and each variant maps to exactly one constructor; any other name
//! is rejected with [`SceneError::UnknownKind`].

use std::{fmt, str::FromStr};

use crate::SceneError;

macro_rules! define_kinds {
    (
        $(#[$meta:meta])*
        $enum_name:ident, $category:literal;
        $($variant:ident => $name:literal),+ $(,)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $enum_name {
            $($variant),+
        }

        impl $enum_name {
            /// Every registered kind, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The name used for this kind in scene files.
            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $enum_name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $enum_name {
            type Err = SceneError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    _ => Err(SceneError::UnknownKind {
                        category: $category,
                        kind: s.to_string(),
                        expected: Self::ALL
                            .iter()
                            .map(|k| k.name())
                            .collect::<Vec<_>>()
                            .join(", "),
                    }),
                }
            }
        }
    };
}

define_kinds!(
    /// A region of the frame that renders one result.
    ViewportKind, "viewport";
    Exodus => "Exodus",
    Plot => "Plot",
);

define_kinds!(
    /// Overlay content drawn on top of a frame.
    AnnotationKind, "annotation";
    Text => "Text",
    Image => "Image",
    Time => "Time",
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_registered_names() {
        for &kind in ViewportKind::ALL {
            assert_eq!(kind.name().parse::<ViewportKind>().unwrap(), kind);
        }
        for &kind in AnnotationKind::ALL {
            assert_eq!(kind.name().parse::<AnnotationKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_is_named() {
        let err = "Contour".parse::<ViewportKind>().unwrap_err();

        match &err {
            SceneError::UnknownKind {
                category,
                kind,
                expected,
            } => {
                assert_eq!(*category, "viewport");
                assert_eq!(kind, "Contour");
                assert_eq!(expected, "Exodus, Plot");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            err.to_string(),
            "unknown viewport type `Contour` (expected one of: Exodus, Plot)"
        );
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!("time".parse::<AnnotationKind>().is_err());
    }
}
