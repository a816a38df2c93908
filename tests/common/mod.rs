#![allow(dead_code)]

pub mod fake_petstore;

use petstore_contract::fixture::{PetResource, ResourceGuard, UserResource};
use petstore_contract::{telemetry, Pet, PetStatus, PetstoreClient, SuiteConfig, User};
use rstest::fixture;
use tokio::runtime::Runtime;
use wiremock::MockServer;

use fake_petstore::FakePetstore;

// Общие ресурсы для теста. Runtime удаляется последним
pub struct TestContext {
    pub server: MockServer,
    pub client: PetstoreClient,
    pub base_url: String,
    pub rt: Runtime,
}

// У каждого теста свой фейковый магазин, тесты не видят чужих питомцев
#[fixture]
pub fn test_ctx() -> TestContext {
    telemetry::init_tracing("petstore_contract=debug");

    // Создаем runtime для асинхронных операций
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(FakePetstore::start());
    let base_url = format!("{}/v2", server.uri());
    let client = PetstoreClient::new(&SuiteConfig::new(&base_url)).unwrap();

    TestContext {
        server,
        client,
        base_url,
        rt,
    }
}

pub fn fluffy(id: i64) -> Pet {
    Pet::new(id, "Fluffy")
        .with_category(2, "cats")
        .with_photo_url("http://example.com/fluffy.jpg")
        .with_tag(1, "test")
        .with_status(PetStatus::Available)
}

pub fn fluffy_updated(id: i64) -> Pet {
    Pet::new(id, "Fluffy_Updated")
        .with_category(2, "cats")
        .with_photo_url("http://example.com/fluffy_updated.jpg")
        .with_tag(1, "test")
        .with_tag(2, "updated")
        .with_status(PetStatus::Sold)
}

pub fn test_user(username: &str) -> User {
    let mut user = User::new(petstore_contract::ids::unique_pet_id(), username);
    user.first_name = Some("Test".into());
    user.last_name = Some("User".into());
    user.email = Some(format!("{username}@example.com"));
    user.password = Some("password123".into());
    user.phone = Some("1234567890".into());
    user
}

pub fn created_pet(ctx: &TestContext) -> ResourceGuard<'_, PetResource> {
    let pet = fluffy(petstore_contract::ids::unique_pet_id());
    ResourceGuard::acquire(&ctx.rt, &ctx.client, &pet).expect("Failed to create pet")
}

pub fn created_user(ctx: &TestContext) -> ResourceGuard<'_, UserResource> {
    let user = test_user(&petstore_contract::ids::unique_username("contract_user"));
    ResourceGuard::acquire(&ctx.rt, &ctx.client, &user).expect("Failed to create user")
}
