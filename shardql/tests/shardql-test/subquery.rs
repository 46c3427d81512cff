use expect_test::expect;
use shardql::ast::{
    BinaryOperator, ColumnOrigin, Expr, InList, Literal, SelectItem, SelectStatement, TableFactor,
};
use shardql::{Binder, DEFAULT_MAX_DEPTH};

use crate::{bind, binding_of, check_err, fixture_catalog};

fn correlated_exists_filter() -> SelectStatement {
    // SELECT * FROM users WHERE EXISTS
    //   (SELECT * FROM orders WHERE orders.user_id = users.id)
    let inner = SelectStatement::new(
        vec![SelectItem::Wildcard],
        vec![TableFactor::table("orders")],
    )
    .with_filter(Expr::binop(
        BinaryOperator::Eq,
        Expr::qualified_column("orders", "user_id"),
        Expr::qualified_column("users", "id"),
    ));

    SelectStatement::new(vec![SelectItem::Wildcard], vec![TableFactor::table("users")])
        .with_filter(Expr::Exists { subquery: Box::new(inner), negated: false })
}

#[test]
fn test_correlated_exists() {
    let bound = bind(&correlated_exists_filter()).unwrap();

    let Some(Expr::Exists { subquery, negated: false }) = &bound.filter else { panic!() };
    let Some(Expr::BinaryOp { lhs, rhs, .. }) = &subquery.filter else { panic!() };

    let inner_local = binding_of(lhs);
    assert_eq!(inner_local.table, "orders");
    assert_eq!(inner_local.origin, ColumnOrigin::Local);

    let correlated = binding_of(rhs);
    assert_eq!(correlated.table, "users");
    assert_eq!(correlated.origin, ColumnOrigin::Correlated);
}

#[test]
fn test_three_level_exists_reaches_the_top() {
    // the innermost statement references the top-level table through two
    // levels of nesting; the outer union carries it all the way down
    let innermost = SelectStatement::new(
        vec![SelectItem::Wildcard],
        vec![TableFactor::table("audit")],
    )
    .with_filter(Expr::binop(
        BinaryOperator::Eq,
        Expr::qualified_column("audit", "user_id"),
        Expr::qualified_column("users", "id"),
    ));

    let middle = SelectStatement::new(
        vec![SelectItem::Wildcard],
        vec![TableFactor::table("orders")],
    )
    .with_filter(Expr::Exists { subquery: Box::new(innermost), negated: false });

    let outer =
        SelectStatement::new(vec![SelectItem::Wildcard], vec![TableFactor::table("users")])
            .with_filter(Expr::Exists { subquery: Box::new(middle), negated: false });

    let bound = bind(&outer).unwrap();

    let Some(Expr::Exists { subquery: middle, .. }) = &bound.filter else { panic!() };
    let Some(Expr::Exists { subquery: innermost, .. }) = &middle.filter else { panic!() };
    let Some(Expr::BinaryOp { lhs, rhs, .. }) = &innermost.filter else { panic!() };

    assert_eq!(binding_of(lhs).origin, ColumnOrigin::Local);
    let top = binding_of(rhs);
    assert_eq!(top.table, "users");
    assert_eq!(top.origin, ColumnOrigin::Correlated);
}

#[test]
fn test_in_subquery_promotes_local_scope() {
    // SELECT * FROM users WHERE id NOT IN
    //   (SELECT user_id FROM orders WHERE orders.region = users.region)
    let subquery = SelectStatement::new(
        vec![SelectItem::Expr(Expr::column("user_id"))],
        vec![TableFactor::table("orders")],
    )
    .with_filter(Expr::binop(
        BinaryOperator::Eq,
        Expr::qualified_column("orders", "region"),
        Expr::qualified_column("users", "region"),
    ));

    let stmt = SelectStatement::new(vec![SelectItem::Wildcard], vec![TableFactor::table("users")])
        .with_filter(Expr::In {
            expr: Box::new(Expr::column("id")),
            list: InList::Subquery(Box::new(subquery)),
            negated: true,
        });

    let bound = bind(&stmt).unwrap();
    let Some(Expr::In { expr, list: InList::Subquery(subquery), negated: true }) = &bound.filter
    else {
        panic!()
    };

    assert_eq!(binding_of(expr).table, "users");
    let Some(Expr::BinaryOp { rhs, .. }) = &subquery.filter else { panic!() };
    assert_eq!(binding_of(rhs).origin, ColumnOrigin::Correlated);
}

#[test]
fn test_in_list_binds_every_element() {
    let stmt = SelectStatement::new(vec![SelectItem::Wildcard], vec![TableFactor::table("users")])
        .with_filter(Expr::In {
            expr: Box::new(Expr::column("region")),
            list: InList::Values(vec![
                Expr::Literal(Literal::String("us".into())),
                Expr::column("email"),
            ]),
            negated: false,
        });

    let bound = bind(&stmt).unwrap();
    let Some(Expr::In { list: InList::Values(values), .. }) = &bound.filter else { panic!() };
    assert_eq!(values.len(), 2);
    assert!(matches!(&values[0], Expr::Literal(Literal::String(s)) if s == "us"));
    assert_eq!(binding_of(&values[1]).table, "users");
}

#[test]
fn test_scalar_subquery_in_projection() {
    // SELECT (SELECT total FROM orders WHERE orders.user_id = users.id) FROM users
    let scalar = SelectStatement::new(
        vec![SelectItem::Expr(Expr::column("total"))],
        vec![TableFactor::table("orders")],
    )
    .with_filter(Expr::binop(
        BinaryOperator::Eq,
        Expr::qualified_column("orders", "user_id"),
        Expr::qualified_column("users", "id"),
    ));

    let stmt = SelectStatement::new(
        vec![SelectItem::Expr(Expr::Subquery(Box::new(scalar)))],
        vec![TableFactor::table("users")],
    );

    let bound = bind(&stmt).unwrap();
    let SelectItem::Expr(Expr::Subquery(subquery)) = &bound.projection[0] else { panic!() };
    let Some(Expr::BinaryOp { rhs, .. }) = &subquery.filter else { panic!() };
    assert_eq!(binding_of(rhs).origin, ColumnOrigin::Correlated);
}

#[test]
fn test_subquery_tables_are_invisible_to_the_enclosing_statement() {
    // outer scopes flow inwards only: the enclosing statement cannot
    // reference the subquery's FROM list
    let subquery = SelectStatement::new(
        vec![SelectItem::Expr(Expr::column("user_id"))],
        vec![TableFactor::table("orders")],
    );

    let stmt = SelectStatement::new(vec![SelectItem::Wildcard], vec![TableFactor::table("users")])
        .with_filter(Expr::binop(
            BinaryOperator::And,
            Expr::In {
                expr: Box::new(Expr::column("id")),
                list: InList::Subquery(Box::new(subquery)),
                negated: false,
            },
            Expr::qualified_column("orders", "total"),
        ));

    check_err(&stmt, expect!["unbound table `orders`"]);
}

#[test]
fn test_nesting_depth_is_bounded() {
    let mut stmt =
        SelectStatement::new(vec![SelectItem::Wildcard], vec![TableFactor::table("audit")]);
    for _ in 0..3 {
        stmt = SelectStatement::new(vec![SelectItem::Wildcard], vec![TableFactor::table("users")])
            .with_filter(Expr::Exists { subquery: Box::new(stmt), negated: false });
    }

    let catalog = fixture_catalog();
    let err = Binder::new(&catalog).with_max_depth(2).bind(&stmt).unwrap_err();
    expect!["subquery nesting exceeds the limit of 2"].assert_eq(&err.to_string());

    // the default limit is far above any sane statement
    assert!(Binder::new(&catalog).bind(&stmt).is_ok());
    assert!(DEFAULT_MAX_DEPTH >= 3);
}

#[test]
fn test_not_wraps_a_bound_subquery() {
    let stmt = SelectStatement::new(vec![SelectItem::Wildcard], vec![TableFactor::table("users")])
        .with_filter(Expr::Not(Box::new(correlated_exists_filter().filter.unwrap())));

    let bound = bind(&stmt).unwrap();
    let Some(Expr::Not(inner)) = &bound.filter else { panic!() };
    let Expr::Exists { subquery, .. } = &**inner else { panic!() };
    let Some(Expr::BinaryOp { rhs, .. }) = &subquery.filter else { panic!() };
    assert_eq!(binding_of(rhs).origin, ColumnOrigin::Correlated);
}
