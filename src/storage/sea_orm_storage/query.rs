//! 声明式列表查询组装
//!
//! 两类记录（提交 / 资料）共享同一套过滤、排序与分页语义：
//! 每个端点声明一组固定的 (参数, 目标列, 比较模式) 规则，由这里的
//! 通用例程解释执行。未知的排序键回退到默认列而不报错；缺失或
//! 空白的过滤值不产生约束。所有用户输入一律作为绑定参数传入，
//! 只有白名单中的列名会进入语句结构。

use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, Order};

use crate::errors::Result;
use crate::utils::escape_like_pattern;

/// 过滤值的比较模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// 大小写不敏感的子串匹配
    Contains,
    /// 精确相等
    Exact,
    /// 创建日期下界（含当天 00:00:00 UTC）
    DateFrom,
    /// 创建日期上界（含当天 23:59:59 UTC）
    DateTo,
}

/// 单字段过滤规则
pub struct FieldFilter<C: ColumnTrait> {
    pub column: C,
    pub mode: Comparison,
    pub value: Option<String>,
}

impl<C: ColumnTrait> FieldFilter<C> {
    pub fn new(column: C, mode: Comparison, value: Option<String>) -> Self {
        Self {
            column,
            mode,
            value,
        }
    }
}

/// 多列 OR 搜索规则：任一目标列包含搜索词即命中
pub struct SearchFilter<C: ColumnTrait> {
    pub columns: &'static [C],
    pub value: Option<String>,
}

impl<C: ColumnTrait> SearchFilter<C> {
    pub fn none() -> Self {
        Self {
            columns: &[],
            value: None,
        }
    }
}

/// 排序白名单：合法的 (参数名, 列) 映射与默认列
pub struct SortRules<C: ColumnTrait> {
    pub allowed: &'static [(&'static str, C)],
    pub default_column: C,
}

/// 分页窗口：page ≥ 1（默认 1），limit 限制在 [1, 100]（默认 20）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub size: u64,
}

impl PageWindow {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = Ord::max(page.unwrap_or(1), 1) as u64;
        let size = limit.unwrap_or(20).clamp(1, 100) as u64;
        Self { page, size }
    }
}

/// 将过滤规则集解释为 AND 组合的查询条件
///
/// 命名过滤彼此 AND；search 规则内部各列 OR，再与其余条件 AND。
pub fn compose_condition<C: ColumnTrait + Copy>(
    filters: Vec<FieldFilter<C>>,
    search: SearchFilter<C>,
) -> Result<Condition> {
    let mut condition = Condition::all();

    for filter in filters {
        let Some(raw) = filter.value else { continue };
        let value = raw.trim();
        if value.is_empty() {
            continue;
        }

        condition = condition.add(match filter.mode {
            Comparison::Contains => contains_expr(filter.column, value),
            Comparison::Exact => filter.column.eq(value),
            Comparison::DateFrom => filter.column.gte(day_start_timestamp(value)?),
            Comparison::DateTo => filter.column.lte(day_end_timestamp(value)?),
        });
    }

    if let Some(raw) = search.value {
        let value = raw.trim().to_owned();
        if !value.is_empty() && !search.columns.is_empty() {
            let mut any = Condition::any();
            for column in search.columns {
                any = any.add(contains_expr(*column, &value));
            }
            condition = condition.add(any);
        }
    }

    Ok(condition)
}

/// 解析排序参数：未知字段回退到默认列，未知方向回退到 DESC
pub fn resolve_sort<C: ColumnTrait + Copy>(
    rules: &SortRules<C>,
    sort_by: Option<&str>,
    sort_order: Option<&str>,
) -> (C, Order) {
    let column = sort_by
        .and_then(|requested| {
            rules
                .allowed
                .iter()
                .find(|(name, _)| *name == requested)
                .map(|(_, column)| *column)
        })
        .unwrap_or(rules.default_column);

    let order = match sort_order {
        Some(direction) if direction.eq_ignore_ascii_case("asc") => Order::Asc,
        _ => Order::Desc,
    };

    (column, order)
}

// 大小写不敏感子串匹配：LOWER(col) LIKE '%<转义后的小写值>%' ESCAPE '\'
fn contains_expr<C: ColumnTrait>(column: C, value: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like_pattern(&value.to_lowercase()));
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\'))
}

// "YYYY-MM-DD" → 当天 00:00:00 UTC 的时间戳
fn day_start_timestamp(value: &str) -> Result<i64> {
    let date = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")?;
    Ok(date
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default())
}

// "YYYY-MM-DD" → 当天 23:59:59 UTC 的时间戳
fn day_end_timestamp(value: &str) -> Result<i64> {
    let date = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")?;
    Ok(date
        .and_hms_opt(23, 59, 59)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::submissions::{Column, Entity as Submissions};
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    const SORT_RULES: SortRules<Column> = SortRules {
        allowed: &[
            ("created_at", Column::CreatedAt),
            ("subject", Column::Subject),
        ],
        default_column: Column::CreatedAt,
    };

    fn sql_for(condition: Condition) -> String {
        Submissions::find()
            .filter(condition)
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn test_page_window_defaults() {
        assert_eq!(PageWindow::new(None, None), PageWindow { page: 1, size: 20 });
    }

    #[test]
    fn test_page_window_clamps_limit() {
        assert_eq!(PageWindow::new(Some(2), Some(1000)).size, 100);
        assert_eq!(PageWindow::new(Some(2), Some(0)).size, 1);
        assert_eq!(PageWindow::new(Some(2), Some(-5)).size, 1);
    }

    #[test]
    fn test_page_window_floors_page_at_one() {
        assert_eq!(PageWindow::new(Some(0), None).page, 1);
        assert_eq!(PageWindow::new(Some(-3), None).page, 1);
    }

    #[test]
    fn test_resolve_sort_known_field() {
        let (column, order) = resolve_sort(&SORT_RULES, Some("subject"), Some("ASC"));
        assert_eq!(column, Column::Subject);
        assert_eq!(order, Order::Asc);
    }

    #[test]
    fn test_resolve_sort_unknown_field_falls_back() {
        let (column, order) = resolve_sort(&SORT_RULES, Some("evil; DROP TABLE"), None);
        assert_eq!(column, Column::CreatedAt);
        assert_eq!(order, Order::Desc);
    }

    #[test]
    fn test_resolve_sort_direction_case_insensitive() {
        let (_, order) = resolve_sort(&SORT_RULES, None, Some("asc"));
        assert_eq!(order, Order::Asc);
        let (_, order) = resolve_sort(&SORT_RULES, None, Some("sideways"));
        assert_eq!(order, Order::Desc);
    }

    #[test]
    fn test_empty_filters_produce_no_constraint() {
        let condition = compose_condition(
            vec![
                FieldFilter::new(Column::Subject, Comparison::Contains, None),
                FieldFilter::new(Column::Status, Comparison::Exact, Some("   ".into())),
            ],
            SearchFilter::none(),
        )
        .unwrap();
        assert!(!sql_for(condition).contains("WHERE"));
    }

    #[test]
    fn test_contains_filter_is_case_insensitive() {
        let condition = compose_condition(
            vec![FieldFilter::new(
                Column::Subject,
                Comparison::Contains,
                Some("Math".into()),
            )],
            SearchFilter::none(),
        )
        .unwrap();
        let sql = sql_for(condition);
        assert!(sql.contains("LOWER"));
        assert!(sql.contains("%math%"));
    }

    #[test]
    fn test_search_columns_are_or_combined() {
        let condition = compose_condition(
            vec![FieldFilter::new(
                Column::Status,
                Comparison::Exact,
                Some("recebido".into()),
            )],
            SearchFilter {
                columns: &[Column::StudentName, Column::Title],
                value: Some("ana".into()),
            },
        )
        .unwrap();
        let sql = sql_for(condition);
        assert!(sql.contains(" OR "));
        assert!(sql.contains(" AND "));
    }

    #[test]
    fn test_date_bounds_cover_whole_day() {
        let start = day_start_timestamp("2024-01-15").unwrap();
        let end = day_end_timestamp("2024-01-15").unwrap();
        assert_eq!(end - start, 86_399);
        assert_eq!(start % 86_400, 0);
    }

    #[test]
    fn test_invalid_date_is_an_error() {
        let result = compose_condition(
            vec![FieldFilter::new(
                Column::CreatedAt,
                Comparison::DateFrom,
                Some("not-a-date".into()),
            )],
            SearchFilter::none(),
        );
        assert!(result.is_err());
    }
}
