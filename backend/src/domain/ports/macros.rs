//! Helper macro for declaring port error enums with snake_case constructors.
//!
//! `AssociationStoreError` is declared through it, so adapters build errors
//! with calls such as `AssociationStoreError::conflict(message)` and every
//! variant gets its `thiserror` display text in one place.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum LedgerPortError {
            Rejected { message: String } => "rejected: {message}",
            Exhausted { attempts: u32 } => "gave up after {attempts} attempts",
            Stalled { message: String, attempts: u32 } => "stalled: {message} ({attempts})",
            Closed => "store closed",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = LedgerPortError::rejected("duplicate id");
        assert_eq!(err.to_string(), "rejected: duplicate id");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = LedgerPortError::exhausted(3_u32);
        assert_eq!(err.to_string(), "gave up after 3 attempts");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = LedgerPortError::stalled("lock wait", 2_u32);
        assert_eq!(err.to_string(), "stalled: lock wait (2)");
    }

    #[test]
    fn unit_variants_get_snake_case_constructors() {
        assert_eq!(LedgerPortError::closed(), LedgerPortError::Closed);
    }
}
