use sea_orm::{
    ColumnTrait, EntityTrait, IntoSimpleExpr, QuerySelect, Select,
    sea_query::{Expr, SimpleExpr, extension::postgres::PgExpr},
};

use foodgram_domain::pagination::PageRequest;

pub trait SelectPage {
    /// Apply `OFFSET`/`LIMIT` for the requested page.
    fn page(self, page: PageRequest) -> Self;
}

impl<E> SelectPage for Select<E>
where
    E: EntityTrait,
{
    fn page(self, page: PageRequest) -> Self {
        let page = page.clamped();
        QuerySelect::limit(QuerySelect::offset(self, page.offset()), u64::from(page.limit))
    }
}

/// Escape `%`, `_` and `\` so user input matches literally inside `LIKE`.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Case-insensitive prefix match (`col ILIKE 'prefix%'`).
pub fn ilike_prefix<C>(column: C, prefix: &str) -> SimpleExpr
where
    C: ColumnTrait,
{
    Expr::expr(column.into_simple_expr()).ilike(format!("{}%", escape_like(prefix)))
}
