use sea_orm::{
    DbErr, SqlErr,
    sea_query::{Expr, Func, LikeExpr, SimpleExpr},
};

/// Whether `err` is a unique / primary-key constraint violation raised by the database.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Whether `err` is a foreign-key violation, e.g. a row referencing a parent deleted mid-request.
pub fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

/// Escape `%`, `_` and `\` so `prefix` matches literally inside a LIKE pattern.
pub fn escape_like(prefix: &str) -> String {
    let mut out = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Case-insensitive "starts with" condition: `LOWER(col) LIKE 'prefix%'`.
pub fn lower_starts_with<C>(col: C, prefix: &str) -> SimpleExpr
where
    C: sea_orm::sea_query::IntoColumnRef,
{
    let pattern = format!("{}%", escape_like(&prefix.to_lowercase()));
    Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(pattern).escape('\\'))
}
