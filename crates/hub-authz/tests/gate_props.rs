use hub_authz::{is_allowed, PermissionGate, PermissionSet, User};
use hub_query::QueryResult;
use proptest::prelude::*;

fn tokens() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-c]:(read|write)", 0..6)
}

#[test]
fn test_gate_opens_after_user_query_resolves() {
    let gate = PermissionGate::any_of(["project:delete"]);

    let mut user_query: QueryResult<User, String> = QueryResult::loading();
    assert!(gate.render(&user_query, || "delete").is_none());

    user_query = QueryResult::success(User::new("ana", PermissionSet::from(["project:view"])));
    assert!(gate.render(&user_query, || "delete").is_none());

    user_query = QueryResult::success(User::new(
        "ana",
        PermissionSet::from(["project:view", "project:delete"]),
    ));
    assert_eq!(gate.render(&user_query, || "delete"), Some("delete"));
}

proptest! {
    #[test]
    fn prop_allowed_iff_shared_token(user in tokens(), required in tokens()) {
        let user_set: PermissionSet = user.iter().map(String::as_str).collect();
        let required_set: PermissionSet = required.iter().map(String::as_str).collect();

        let shared = required.iter().any(|r| user.contains(r));
        prop_assert_eq!(is_allowed(&user_set, &required_set), shared);
    }

    #[test]
    fn prop_empty_requirement_never_allows(user in tokens()) {
        let user_set: PermissionSet = user.iter().map(String::as_str).collect();
        prop_assert!(!is_allowed(&user_set, &PermissionSet::new()));
    }
}
