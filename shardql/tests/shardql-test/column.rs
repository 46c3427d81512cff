use expect_test::expect;
use shardql::ast::{ColumnOrigin, Expr, SelectItem, SelectStatement, TableFactor};
use shardql::{Binder, Distribution};

use crate::{bind, binding_of, check_err, fixture_catalog};

fn select(projection: Vec<SelectItem>, from: Vec<TableFactor>) -> SelectStatement {
    SelectStatement::new(projection, from)
}

#[test]
fn test_unqualified_column_binds_with_metadata() {
    let stmt = select(
        vec![SelectItem::Expr(Expr::column("email"))],
        vec![TableFactor::table("users")],
    );

    let bound = bind(&stmt).unwrap();
    let SelectItem::Expr(expr) = &bound.projection[0] else { panic!() };
    let binding = binding_of(expr);

    assert_eq!(binding.table, "users");
    assert_eq!(binding.table_name, "users");
    assert_eq!(binding.origin, ColumnOrigin::Local);
    assert_eq!(binding.column.name().as_str(), "email");
    assert_eq!(binding.column.index().as_usize(), 1);
}

#[test]
fn test_binding_carries_enough_to_route_shards() {
    let stmt = select(
        vec![SelectItem::Expr(Expr::column("total"))],
        vec![TableFactor::aliased("orders", "o")],
    );

    let bound = bind(&stmt).unwrap();
    let SelectItem::Expr(expr) = &bound.projection[0] else { panic!() };
    let binding = binding_of(expr);
    assert_eq!(binding.table, "o");
    assert_eq!(binding.table_name, "orders");

    // the resolved table name leads back to the placement metadata
    let catalog = fixture_catalog();
    let table = catalog.table(&binding.table_name).unwrap();
    assert!(matches!(table.distribution(), Distribution::Sharded { units } if units.len() == 2));
}

#[test]
fn test_ambiguous_unqualified_column() {
    let stmt = select(
        vec![SelectItem::Expr(Expr::column("region"))],
        vec![TableFactor::table("users"), TableFactor::table("orders")],
    );

    check_err(
        &stmt,
        expect!["column `region` is ambiguous, it could refer to any one of `users.region`, `orders.region`"],
    );
}

#[test]
fn test_qualified_column_disambiguates() {
    let stmt = select(
        vec![SelectItem::Expr(Expr::qualified_column("users", "region"))],
        vec![TableFactor::table("users"), TableFactor::table("orders")],
    );

    let bound = bind(&stmt).unwrap();
    let SelectItem::Expr(expr) = &bound.projection[0] else { panic!() };
    assert_eq!(binding_of(expr).table, "users");
}

#[test]
fn test_unknown_column() {
    let stmt = select(
        vec![SelectItem::Expr(Expr::column("missing_col"))],
        vec![TableFactor::table("users")],
    );

    check_err(&stmt, expect!["unbound column `missing_col`"]);
}

#[test]
fn test_unknown_table_qualifier() {
    let stmt = select(
        vec![SelectItem::Expr(Expr::qualified_column("nothere", "id"))],
        vec![TableFactor::table("users")],
    );

    check_err(&stmt, expect!["unbound table `nothere`"]);
}

#[test]
fn test_aliased_table_hides_its_base_name() {
    let stmt = select(
        vec![SelectItem::Expr(Expr::qualified_column("users", "id"))],
        vec![TableFactor::aliased("users", "u")],
    );

    check_err(&stmt, expect!["unbound table `users`"]);
}

#[test]
fn test_self_join_requires_aliases() {
    let stmt = select(
        vec![SelectItem::Wildcard],
        vec![TableFactor::table("users"), TableFactor::table("users")],
    );

    check_err(&stmt, expect!["table name `users` specified more than once"]);

    let aliased = select(
        vec![SelectItem::Expr(Expr::qualified_column("u2", "id"))],
        vec![TableFactor::aliased("users", "u1"), TableFactor::aliased("users", "u2")],
    );
    let bound = bind(&aliased).unwrap();
    let SelectItem::Expr(expr) = &bound.projection[0] else { panic!() };
    assert_eq!(binding_of(expr).table, "u2");
    assert_eq!(binding_of(expr).table_name, "users");
}

#[test]
fn test_resolution_is_stable_across_binds() {
    let catalog = fixture_catalog();
    let binder = Binder::new(&catalog);
    let stmt = select(
        vec![SelectItem::Expr(Expr::column("user_id"))],
        vec![TableFactor::table("orders"), TableFactor::table("users")],
    );

    let first = binder.bind(&stmt).unwrap();
    let second = binder.bind(&stmt).unwrap();
    assert_eq!(first, second);
}
