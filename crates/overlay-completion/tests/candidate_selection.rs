use overlay_completion::{
    Binding, CompletionMode, Parameter, Symbol, SymbolId, SymbolKind, SymbolTable, candidates_at,
    generic_candidates, invocation_candidates, parts_to_string,
};
use overlay_core::TextSpan;
use pretty_assertions::assert_eq;

struct Fixture {
    table: SymbolTable,
    string_type: SymbolId,
    ctor_chars: SymbolId,
    ctor_char_count: SymbolId,
    ctor_span: SymbolId,
    list: SymbolId,
    list_of_t: SymbolId,
    list_of_tu: SymbolId,
    select: SymbolId,
    select_indexed: SymbolId,
}

fn fixture() -> Fixture {
    let mut table = SymbolTable::new();
    let system = table.add(Symbol::new("System", SymbolKind::Namespace));
    let string_type = table.add(Symbol::new("String", SymbolKind::Type).in_container(system));
    let ctor_chars = table.add(
        Symbol::new(".ctor", SymbolKind::Constructor)
            .in_container(string_type)
            .with_parameters(vec![Parameter::new("value", "char[]")]),
    );
    table.add(
        Symbol::new("Length", SymbolKind::Property)
            .in_container(string_type)
            .with_return_type("int"),
    );
    let ctor_char_count = table.add(
        Symbol::new(".ctor", SymbolKind::Constructor)
            .in_container(string_type)
            .with_parameters(vec![Parameter::new("c", "char"), Parameter::new("count", "int")]),
    );
    let ctor_span = table.add(
        Symbol::new(".ctor", SymbolKind::Constructor)
            .in_container(string_type)
            .with_parameters(vec![Parameter::new("value", "ReadOnlySpan<char>")]),
    );

    let list = table.add(Symbol::new("List", SymbolKind::Type).in_container(system));
    let list_of_t = table.add(
        Symbol::new("List", SymbolKind::Type)
            .in_container(system)
            .with_type_parameters(["T"]),
    );
    table.add(
        Symbol::new("Dictionary", SymbolKind::Type)
            .in_container(system)
            .with_type_parameters(["TKey", "TValue"]),
    );
    let list_of_tu = table.add(
        Symbol::new("List", SymbolKind::Type)
            .in_container(system)
            .with_type_parameters(["T", "U"]),
    );

    let enumerable = table.add(Symbol::new("Enumerable", SymbolKind::Type).in_container(system));
    let select = table.add(
        Symbol::new("Select", SymbolKind::Method)
            .in_container(enumerable)
            .with_type_parameters(["TSource", "TResult"])
            .with_parameters(vec![
                Parameter::new("source", "IEnumerable<TSource>"),
                Parameter::new("selector", "Func<TSource, TResult>"),
            ]),
    );
    table.add(Symbol::new("Select", SymbolKind::Method).in_container(enumerable));
    let select_indexed = table.add(
        Symbol::new("Select", SymbolKind::Method)
            .in_container(enumerable)
            .with_type_parameters(["TSource", "TResult"])
            .with_parameters(vec![
                Parameter::new("source", "IEnumerable<TSource>"),
                Parameter::new("selector", "Func<TSource, int, TResult>"),
            ]),
    );

    Fixture {
        table,
        string_type,
        ctor_chars,
        ctor_char_count,
        ctor_span,
        list,
        list_of_t,
        list_of_tu,
        select,
        select_indexed,
    }
}

#[test]
fn test_constructor_binding_lists_exactly_the_constructors() {
    let f = fixture();
    let list = invocation_candidates(&f.table, &Binding::Resolved(f.ctor_char_count));
    assert_eq!(
        list.ids(),
        vec![f.ctor_char_count, f.ctor_chars, f.ctor_span]
    );
    assert_eq!(
        parts_to_string(&list.candidates[0].display_parts),
        "String(char c, int count)"
    );
    assert_eq!(list.candidates[0].containing_scope, Some(f.string_type));
}

#[test]
fn test_type_binding_adds_its_constructors() {
    let f = fixture();
    let list = invocation_candidates(&f.table, &Binding::Resolved(f.string_type));
    assert_eq!(
        list.ids(),
        vec![f.string_type, f.ctor_chars, f.ctor_char_count, f.ctor_span]
    );
}

#[test]
fn test_ambiguous_constructors_stay_first_without_duplicates() {
    let f = fixture();
    let list = invocation_candidates(
        &f.table,
        &Binding::Ambiguous(vec![f.ctor_span, f.ctor_chars, f.ctor_span]),
    );
    assert_eq!(
        list.ids(),
        vec![f.ctor_span, f.ctor_chars, f.ctor_char_count]
    );
}

#[test]
fn test_generic_types_resolved_through_namespace() {
    let f = fixture();
    let list = generic_candidates(&f.table, &Binding::Resolved(f.list_of_t));
    assert_eq!(list.ids(), vec![f.list_of_t, f.list_of_tu]);
    assert!(list.should_show());
    assert!(!list.ids().contains(&f.list));
    assert_eq!(list.candidates[1].arity, 2);
}

#[test]
fn test_generic_methods_skip_non_generic_overloads() {
    let f = fixture();
    let list = generic_candidates(&f.table, &Binding::Resolved(f.select));
    assert_eq!(list.ids(), vec![f.select, f.select_indexed]);
}

#[test]
fn test_single_generic_candidate_is_not_shown() {
    let mut table = SymbolTable::new();
    let ns = table.add(Symbol::new("App", SymbolKind::Namespace));
    let only = table.add(
        Symbol::new("Box", SymbolKind::Type)
            .in_container(ns)
            .with_type_parameters(["T"]),
    );
    let list = generic_candidates(&table, &Binding::Resolved(only));
    assert_eq!(list.ids(), vec![only]);
    assert!(!list.should_show());
}

#[test]
fn test_nested_generic_types_resolved_through_outer_type() {
    let mut table = SymbolTable::new();
    let outer = table.add(Symbol::new("Outer", SymbolKind::Type));
    let a = table.add(
        Symbol::new("Node", SymbolKind::Type)
            .in_container(outer)
            .with_type_parameters(["T"]),
    );
    let b = table.add(
        Symbol::new("Node", SymbolKind::Type)
            .in_container(outer)
            .with_type_parameters(["K", "V"]),
    );
    let list = generic_candidates(&table, &Binding::Resolved(b));
    assert_eq!(list.ids(), vec![a, b]);
}

#[test]
fn test_candidates_at_uses_binding_under_caret() {
    let mut f = fixture();
    f.table
        .bind(TextSpan::new(8, 6), Binding::Resolved(f.ctor_chars));
    let list = candidates_at(&f.table, 14, CompletionMode::InvocationArgument);
    assert_eq!(list.ids()[0], f.ctor_chars);
    assert_eq!(list.candidates.len(), 3);

    let nothing = candidates_at(&f.table, 40, CompletionMode::InvocationArgument);
    assert!(!nothing.should_show());
}
