//! Bound query parameters. `PgBindValue` binds directly with `.bind(...)` on any sqlx query kind.

use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};

/// A value bound to a positional placeholder.
#[derive(Clone, Debug, PartialEq)]
pub enum PgBindValue {
    I64(i64),
    Text(String),
}

impl<'q> Encode<'q, Postgres> for PgBindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            PgBindValue::I64(n) => <i64 as Encode<Postgres>>::encode_by_ref(n, buf),
            PgBindValue::Text(s) => <String as Encode<Postgres>>::encode_by_ref(s, buf),
        }
    }

    /// Each variant declares its own wire type, so ids go out as INT8 and patterns as TEXT.
    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            PgBindValue::I64(_) => <i64 as Type<Postgres>>::type_info(),
            PgBindValue::Text(_) => <String as Type<Postgres>>::type_info(),
        })
    }
}

impl Type<Postgres> for PgBindValue {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <i64 as Type<Postgres>>::compatible(ty) || <String as Type<Postgres>>::compatible(ty)
    }
}

/// One bound parameter: the filter it came from and its value. Position in the list is the `$n` index - 1.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundParam {
    pub name: &'static str,
    pub value: PgBindValue,
}

impl BoundParam {
    pub fn int(name: &'static str, v: i64) -> Self {
        BoundParam {
            name,
            value: PgBindValue::I64(v),
        }
    }

    pub fn text(name: &'static str, v: impl Into<String>) -> Self {
        BoundParam {
            name,
            value: PgBindValue::Text(v.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_variant_declares_its_wire_type() {
        assert_eq!(
            PgBindValue::I64(7).produces(),
            Some(<i64 as Type<Postgres>>::type_info())
        );
        assert_eq!(
            PgBindValue::Text("%ace%".into()).produces(),
            Some(<String as Type<Postgres>>::type_info())
        );
    }

    #[test]
    fn binds_through_query_arguments() {
        use sqlx::Arguments;
        let mut args = sqlx::postgres::PgArguments::default();
        args.add(PgBindValue::I64(7)).unwrap();
        args.add(PgBindValue::Text("mar".into())).unwrap();
    }
}
