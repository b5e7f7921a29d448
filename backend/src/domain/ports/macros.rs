//! Helper macro for port error enums.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! parameters accept `impl Into<FieldType>`, so adapters can write
//! `FetchError::transport(err.to_string())` or `FetchError::transport("down")`.

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
    define_port_error! {
        pub enum ProviderPortError {
            Offline => "provider offline",
            Rejected { message: String } => "provider rejected call: {message}",
            Throttled { seconds: u32 } => "provider throttled for {seconds}s",
            Partial { message: String, missing: u32 } => "partial reply: {message} ({missing} missing)",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(ProviderPortError::offline(), ProviderPortError::Offline);
        assert_eq!(ProviderPortError::offline().to_string(), "provider offline");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = ProviderPortError::rejected("bad name");
        assert_eq!(err.to_string(), "provider rejected call: bad name");
    }

    #[test]
    fn non_string_fields_keep_their_type() {
        assert_eq!(
            ProviderPortError::throttled(30_u32).to_string(),
            "provider throttled for 30s"
        );
    }

    #[test]
    fn mixed_fields_are_supported() {
        let err = ProviderPortError::partial("country list", 2_u32);
        assert_eq!(err.to_string(), "partial reply: country list (2 missing)");
    }
}
