use uuid::Uuid;

use users::api::rest::dto::{CreateUserReq, ListUsersQuery, UpdateUserReq, UserDto};
use users::contract::{error::UsersError, model::*};
use users::domain::error::{DomainError, RepoError};
// Note: These internal module imports are only for testing
// External consumers should only use the `contract` module

#[test]
fn test_new_user_gets_fresh_random_id() {
    let a = User::new("Ann", "admin");
    let b = NewUser {
        name: "Ann".to_string(),
        role: "admin".to_string(),
    }
    .into_user();

    assert!(!a.id.is_nil());
    assert!(!b.id.is_nil());
    assert_ne!(a.id, b.id);
    assert_eq!(a.id.get_version_num(), 4);
    assert_eq!((b.name.as_str(), b.role.as_str()), ("Ann", "admin"));
}

#[test]
fn test_user_properties_matching() {
    let user = User::new("Ann", "admin");

    assert!(UserProperties::default().is_empty());
    assert!(UserProperties::default().matches(&user));

    let by_role = UserProperties {
        role: Some("admin".to_string()),
        ..Default::default()
    };
    assert!(!by_role.is_empty());
    assert!(by_role.matches(&user));

    let wrong_case = UserProperties {
        name: Some("ann".to_string()),
        ..Default::default()
    };
    assert!(!wrong_case.matches(&user));

    let partial = UserProperties {
        name: Some("An".to_string()),
        ..Default::default()
    };
    assert!(!partial.matches(&user));

    let both = UserProperties {
        name: Some("Ann".to_string()),
        role: Some("owner".to_string()),
    };
    assert!(!both.matches(&user));
}

#[test]
fn test_domain_error_messages() {
    let id = Uuid::new_v4();

    assert_eq!(DomainError::invalid_id().to_string(), "invalid user id");

    let err = DomainError::repository("could not delete user by id", RepoError::not_found(id));
    assert_eq!(
        err.to_string(),
        format!("could not delete user by id: could not find user with id {id}")
    );
    assert!(err.is_not_found());
    assert!(!err.is_invalid_id());

    let err = DomainError::repository("could not update user", RepoError::storage("boom"));
    assert!(!err.is_not_found());
    assert_eq!(err.to_string(), "could not update user: storage failure: boom");
}

#[test]
fn test_contract_error_mapping() {
    let id = Uuid::new_v4();

    assert_eq!(UsersError::from(DomainError::InvalidId), UsersError::InvalidId);
    assert_eq!(
        UsersError::from(DomainError::repository("ctx", RepoError::not_found(id))),
        UsersError::NotFound { id }
    );
    assert_eq!(
        UsersError::from(DomainError::repository("ctx", RepoError::storage("x"))),
        UsersError::Internal
    );
}

#[test]
fn test_rest_dto_models() {
    let user = User::new("Ann", "admin");
    let dto = UserDto::from(user.clone());
    assert_eq!(dto.id, user.id);

    let json = serde_json::to_value(&dto).expect("Should serialize");
    assert_eq!(json["id"], user.id.to_string());
    assert_eq!(json["name"], "Ann");
    assert_eq!(json["role"], "admin");

    let req: CreateUserReq = serde_json::from_str(r#"{"name":"Bob"}"#).expect("Should deserialize");
    let new_user = NewUser::from(req);
    assert_eq!(new_user.name, "Bob");
    assert_eq!(new_user.role, "");
}

#[test]
fn test_update_user_req_conversion() {
    let req: UpdateUserReq = serde_json::from_str(r#"{"role":"owner","name":null}"#).unwrap();
    let patch = UserPatch::from(req);
    assert_eq!(patch.name, None);
    assert_eq!(patch.role, Some("owner".to_string()));

    let req = UpdateUserReq::default();
    assert_eq!(serde_json::to_string(&req).unwrap(), "{}");
    assert_eq!(UserPatch::from(req), UserPatch::default());
}

#[test]
fn test_list_query_into_filter() {
    let query = ListUsersQuery {
        name: Some(String::new()),
        role: Some("admin".to_string()),
    };
    let filter = query.into_filter();
    assert_eq!(filter.name, None);
    assert_eq!(filter.role, Some("admin".to_string()));

    assert!(ListUsersQuery::default().into_filter().is_empty());
}

#[test]
fn test_list_query_from_pairs() {
    let pairs = vec![
        ("role".to_string(), "admin".to_string()),
        ("page".to_string(), "2".to_string()),
        ("role".to_string(), "viewer".to_string()),
        ("name".to_string(), "Ann".to_string()),
    ];
    let query = ListUsersQuery::from_pairs(pairs);
    assert_eq!(query.role.as_deref(), Some("admin"));
    assert_eq!(query.name.as_deref(), Some("Ann"));

    let query = ListUsersQuery::from_pairs(Vec::new());
    assert!(query.into_filter().is_empty());
}
