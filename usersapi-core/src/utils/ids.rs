/// Restituisce l'uri pubblico di un utente, es. `/users/42`.
pub fn user_uri(id: i64) -> String {
    format!("/users/{id}")
}
