//! Newtype IDs so a cart line key can never be passed where a product key is expected.

use serde::{Deserialize, Serialize};

/// Defines a string-backed ID newtype.
///
/// Generates `Serialize`/`Deserialize` (transparent), `Debug`, `Clone`, `PartialEq`, `Eq`,
/// `Hash`, `Display`, `new()`, `as_str()` and `From<&str>` / `From<String>`.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(
    /// A signed-in user, as issued by the backend's auth service.
    UserId
);
define_id!(
    /// A catalog product.
    ProductId
);
define_id!(
    /// A row of the `cart_items` table.
    LineId
);
define_id!(
    /// A row of the `favorites` table.
    FavoriteId
);
define_id!(
    /// A placed order.
    OrderId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_the_raw_key() {
        let id = LineId::new("cart_7");
        assert_eq!(id.to_string(), "cart_7");
        assert_eq!(id.as_str(), "cart_7");
        assert_eq!(LineId::from("cart_7"), id);
    }
}
