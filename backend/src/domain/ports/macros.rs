//! Helper macro for declaring port error enums.
//!
//! Each variant gets a `#[error]` message and a snake_case constructor whose
//! parameters accept anything convertible into the field types, so adapters
//! can write `CourseRepositoryError::query("boom")`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!(
                        "Construct [`", stringify!($name), "::", stringify!($variant), "`]."
                    )]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;
