//! Helper macro for generating repository port error enums.
//!
//! Every port exposes the same two failure categories (connection, query)
//! with port-specific messages; the macro keeps the enums and their snake
//! case constructors in one place.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { message: String } => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { message: String },
            )*
        }

        impl $name {
            ::paste::paste! {
                $(
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant { message: message.into() }
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        /// Example error used to exercise the macro.
        pub enum ExamplePortError {
            Connection { message: String } => "example connection failed: {message}",
            Query { message: String } => "example query failed: {message}",
        }
    }

    #[test]
    fn constructors_accept_str_and_format_messages() {
        let err = ExamplePortError::connection("refused");
        assert_eq!(err.to_string(), "example connection failed: refused");

        let err = ExamplePortError::query("syntax");
        assert_eq!(err.to_string(), "example query failed: syntax");
    }
}
