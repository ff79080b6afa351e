use serde_json::{self as json, json, Value};
use usersapi_core::*;

fn parse(json_str: &str) -> Value {
    json::from_str(json_str).expect("valid json")
}

/*
    Obiettivo test: verificare che UserResource venga serializzato come un unico oggetto piatto
    con i campi della riga più "uri" = "/users/<id>".
*/
#[test]
fn user_resource_is_flat_with_uri() {
    let user = User {
        id: 12,
        name: "Doe".to_string(),
        firstname: "John".to_string(),
        email: "john@doe.com".to_string(),
    };
    let s = json::to_string(&user.clone().into_resource()).expect("serialize");
    let v = parse(&s);

    assert_eq!(v["id"], 12);
    assert_eq!(v["name"], "Doe");
    assert_eq!(v["firstname"], "John");
    assert_eq!(v["email"], "john@doe.com");
    assert_eq!(v["uri"], "/users/12");
    assert!(v.get("user").is_none(), "user must be flattened");

    let back: UserResource = json::from_str(&s).expect("deserialize");
    assert_eq!(back.user, user);
}

/*
    Una riga letta dal database (mappa colonna -> valore) deve diventare un User tipizzato.
*/
#[test]
fn user_from_row_mapping() {
    let row = json!({ "id": 3, "name": "Doe", "firstname": "Jane", "email": "jane@doe.com" });
    let user: User = json::from_value(row).expect("row shape");
    assert_eq!(user.uri(), "/users/3");
}

/*
    Envelope di errore: sempre e solo { status, message }.
*/
#[test]
fn envelopes_have_expected_shape() {
    let v = parse(&json::to_string(&Envelope::user_not_found()).unwrap());
    let expected = json!({
        "status": "not found",
        "message": "The requested user was not found in the system",
    });
    assert_eq!(v, expected);

    let v = parse(&json::to_string(&Envelope::internal()).unwrap());
    assert_eq!(v["status"], "internal server error");
    assert_eq!(v["message"], "An unexpected error has occured, please try again later");

    let v = parse(&json::to_string(&RoutingError::UnknownResource.envelope()).unwrap());
    let expected = json!({
        "status": "Not found",
        "message": "The request resource was not found on the server",
    });
    assert_eq!(v, expected);

    let v = parse(&json::to_string(&RoutingError::UnsupportedOperation.envelope()).unwrap());
    assert_eq!(v, json!({ "status": "not found", "message": "Operation not supported" }));
}

/*
    Validazione del payload di POST /users: messaggi esatti dei casi d'errore.
*/
#[test]
fn validation_messages() {
    let body = parse_body(br#"{"name":"","firstname":"John","email":"a@b.com"}"#);
    let err = NewUser::from_body(&body).unwrap_err();
    assert_eq!(err.envelope(), Envelope::new("bad request", "name is required"));

    let body = parse_body(br#"{"name":"Doe","firstname":"John","email":"not-an-email"}"#);
    let err = NewUser::from_body(&body).unwrap_err();
    assert_eq!(err.envelope().message, "email is invalid");

    // JSON malformato = nessun campo presente
    let err = NewUser::from_body(&parse_body(b"name=Doe")).unwrap_err();
    assert_eq!(err.to_string(), "name is required");
}

#[test]
fn created_body_merges_submitted_fields() {
    let raw = br#"{"name":"Doe","firstname":"John","email":"john@doe.com","nickname":"jd"}"#;
    let body = parse_body(raw);
    let out = Value::Object(created_body(5, &body));

    assert_eq!(out["uri"], "/users/5");
    assert_eq!(out["id"], 5);
    assert_eq!(out["name"], "Doe");
    assert_eq!(out["nickname"], "jd");
}
