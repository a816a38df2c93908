use petstore_contract::{ApiMessage, Pet, PetStatus, User};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// In-memory stand-in for the public pet store, answering the way the
/// real service does for the endpoints the suite uses.
#[derive(Default)]
struct Store {
    pets: Mutex<HashMap<i64, Pet>>,
    users: Mutex<HashMap<String, User>>,
}

#[derive(Clone, Default)]
pub struct FakePetstore {
    store: Arc<Store>,
}

fn message(code: i32, kind: &str, text: impl Into<String>) -> ApiMessage {
    ApiMessage {
        code,
        kind: Some(kind.to_string()),
        message: Some(text.into()),
    }
}

fn json<T: Serialize>(status: u16, body: &T) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(body)
}

impl FakePetstore {
    /// Starts a mock server answering every request from the fake store.
    /// Mocks mounted later with the default priority take precedence.
    pub async fn start() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(FakePetstore::default())
            .with_priority(10)
            .mount(&server)
            .await;
        server
    }

    fn create_pet(&self, body: &[u8]) -> ResponseTemplate {
        match serde_json::from_slice::<Pet>(body) {
            Ok(pet) => {
                self.store.pets.lock().unwrap().insert(pet.id, pet.clone());
                json(200, &pet)
            }
            Err(_) => json(405, &message(405, "unknown", "no data")),
        }
    }

    fn update_pet(&self, body: &[u8]) -> ResponseTemplate {
        // the store upserts on PUT, same as on POST
        self.create_pet(body)
    }

    fn get_pet(&self, id: i64) -> ResponseTemplate {
        match self.store.pets.lock().unwrap().get(&id) {
            Some(pet) => json(200, pet),
            None => json(404, &message(1, "error", "Pet not found")),
        }
    }

    fn update_pet_with_form(&self, id: i64, body: &[u8]) -> ResponseTemplate {
        let mut pets = self.store.pets.lock().unwrap();
        let Some(pet) = pets.get_mut(&id) else {
            return json(404, &message(404, "unknown", "not found"));
        };
        for (key, value) in url::form_urlencoded::parse(body) {
            match key.as_ref() {
                "name" => pet.name = value.into_owned(),
                "status" => pet.status = Some(PetStatus::from(value.as_ref())),
                _ => {}
            }
        }
        json(200, &message(200, "unknown", id.to_string()))
    }

    fn delete_pet(&self, id: i64) -> ResponseTemplate {
        match self.store.pets.lock().unwrap().remove(&id) {
            Some(_) => json(200, &message(200, "unknown", id.to_string())),
            None => ResponseTemplate::new(404),
        }
    }

    fn find_pets_by_status(&self, request: &Request) -> ResponseTemplate {
        let wanted: Vec<String> = request
            .url
            .query_pairs()
            .filter(|(key, _)| key == "status")
            .map(|(_, value)| value.into_owned())
            .collect();
        let pets: Vec<Pet> = self
            .store
            .pets
            .lock()
            .unwrap()
            .values()
            .filter(|pet| {
                pet.status
                    .as_ref()
                    .is_some_and(|status| wanted.iter().any(|w| w == status.as_str()))
            })
            .cloned()
            .collect();
        json(200, &pets)
    }

    fn create_user(&self, body: &[u8]) -> ResponseTemplate {
        match serde_json::from_slice::<User>(body) {
            Ok(user) => {
                let id = user.id;
                self.store
                    .users
                    .lock()
                    .unwrap()
                    .insert(user.username.clone(), user);
                json(200, &message(200, "unknown", id.to_string()))
            }
            Err(_) => json(405, &message(405, "unknown", "no data")),
        }
    }

    fn get_user(&self, username: &str) -> ResponseTemplate {
        match self.store.users.lock().unwrap().get(username) {
            Some(user) => json(200, user),
            None => json(404, &message(1, "error", "User not found")),
        }
    }

    fn delete_user(&self, username: &str) -> ResponseTemplate {
        match self.store.users.lock().unwrap().remove(username) {
            Some(_) => json(200, &message(200, "unknown", username)),
            None => ResponseTemplate::new(404),
        }
    }
}

fn pet_id(raw: &str) -> Result<i64, ResponseTemplate> {
    raw.parse().map_err(|_| {
        json(
            404,
            &message(404, "unknown", format!("java.lang.NumberFormatException: For input string: \"{raw}\"")),
        )
    })
}

impl Respond for FakePetstore {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let segments: Vec<&str> = request
            .url
            .path()
            .trim_matches('/')
            .split('/')
            .collect();
        let body = request.body.as_slice();

        let route = match (request.method.as_str(), segments.as_slice()) {
            ("POST", ["v2", "pet"]) => Ok(self.create_pet(body)),
            ("PUT", ["v2", "pet"]) => Ok(self.update_pet(body)),
            ("GET", ["v2", "pet", "findByStatus"]) => Ok(self.find_pets_by_status(request)),
            ("GET", ["v2", "pet", id]) => pet_id(id).map(|id| self.get_pet(id)),
            ("POST", ["v2", "pet", id]) => pet_id(id).map(|id| self.update_pet_with_form(id, body)),
            ("DELETE", ["v2", "pet", id]) => pet_id(id).map(|id| self.delete_pet(id)),
            ("POST", ["v2", "user"]) => Ok(self.create_user(body)),
            ("GET", ["v2", "user", username]) => Ok(self.get_user(username)),
            ("DELETE", ["v2", "user", username]) => Ok(self.delete_user(username)),
            _ => Ok(ResponseTemplate::new(405)),
        };
        route.unwrap_or_else(|not_found| not_found)
    }
}
