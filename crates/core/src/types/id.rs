//! Ids for catalog entities and storefront accounts.
//!
//! Listings, categories and egg batches are identified by the UUID primary
//! keys of the catalog API; accounts by the storefront database's integer key.
//! Each gets its own newtype so a category id can never be passed where a
//! listing id is expected.

/// Declare an `i32`-backed id newtype.
///
/// The generated type is `Copy`, hashes and compares by value, serializes as a
/// bare integer, parses from a path segment via `FromStr`, and (with the
/// `postgres` feature) binds directly in `sqlx` queries.
///
/// ```rust
/// # use livestock_core::define_id;
/// define_id!(PenId);
///
/// let pen = PenId::new(7);
/// assert_eq!(pen.as_i32(), 7);
/// assert_eq!("7".parse::<PenId>().ok(), Some(pen));
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw key.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// The raw key.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.parse::<i32>().map(Self)
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <i32 as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <i32 as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
                let id = <i32 as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
                Ok(Self(id))
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <i32 as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

/// Declare a UUID-backed id newtype for a catalog API entity.
///
/// Same surface as [`define_id!`] minus the database impls: catalog ids are
/// only ever read from the API and echoed back in URLs.
#[macro_export]
macro_rules! define_uuid_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Wrap a raw key.
            #[must_use]
            pub const fn new(id: ::uuid::Uuid) -> Self {
                Self(id)
            }

            /// The raw key.
            #[must_use]
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0.hyphenated(), f)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                ::uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(UserId);
define_uuid_id!(LivestockId);
define_uuid_id!(CategoryId);
define_uuid_id!(EggListingId);

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    const RAW: &str = "5f1c2b9e-8d4a-4c1e-9b7a-2f3e4d5c6b7a";

    #[test]
    fn test_user_id_serializes_transparently() {
        let id = UserId::new(42);
        assert_eq!(serde_json::to_string(&id).ok().as_deref(), Some("42"));
        assert_eq!("42".parse::<UserId>().ok(), Some(id));
    }

    #[test]
    fn test_catalog_id_serializes_as_uuid_string() {
        let id: LivestockId = RAW.parse().unwrap_or(LivestockId::new(Uuid::nil()));
        assert_eq!(
            serde_json::to_string(&id).ok(),
            Some(format!("\"{RAW}\""))
        );
        assert_eq!(id.to_string(), RAW);
    }

    #[test]
    fn test_catalog_id_from_path_segment() {
        assert!("12".parse::<CategoryId>().is_err());
        assert!("goat".parse::<CategoryId>().is_err());
        assert_eq!(
            RAW.parse::<CategoryId>().ok().map(|id| id.as_uuid()),
            Uuid::parse_str(RAW).ok()
        );
    }

    #[test]
    fn test_distinct_id_types_share_representation() {
        let raw = Uuid::from_u128(3);
        assert_eq!(EggListingId::new(raw).as_uuid(), LivestockId::new(raw).as_uuid());
    }
}
