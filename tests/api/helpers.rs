use reqwest::Response;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use email_capture::{
    config::{get_configuration, Settings},
    startup::Application,
    store::FileStore,
};

pub struct TestApp {
    pub config: Settings,
    pub address: String,
    pub store: FileStore,
    pub email_server: MockServer,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        let mut config = get_configuration().expect("Missing configuration file.");
        let email_server = MockServer::start().await;
        // A fresh data directory per test plays the role the throwaway
        // database played before: full isolation between tests
        let data_dir = std::env::temp_dir().join(format!("email-capture-test-{}", Uuid::new_v4()));

        // We are using port 0 as way to define a different port per each test. Port 0 is a special case that operating systems
        // take into account: when port is 0, the OS will search for the first available port
        config.set_app_port(0);
        config.set_email_client_base_url(email_server.uri());
        config.set_data_dir(data_dir.clone());

        let application = Application::build(config.clone())
            .await
            .expect("Failed to build application.");

        let address = format!("http://127.0.0.1:{}", application.get_port());

        tokio::spawn(application.run_until_stop());

        TestApp {
            address,
            config: config.clone(),
            store: FileStore::new(data_dir),
            email_server,
        }
    }

    pub async fn post_subscribe(&self, body: &serde_json::Value) -> Response {
        let client = reqwest::Client::new();
        let url = format!("{}/api/subscribe", self.address);

        client
            .post(&url)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_contact(&self, body: &serde_json::Value) -> Response {
        let client = reqwest::Client::new();
        let url = format!("{}/api/contact", self.address);

        client
            .post(&url)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, route: &str) -> Response {
        let client = reqwest::Client::new();
        let url = format!("{}{}", self.address, route);

        client
            .get(&url)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Accepts every send on the mock email server with a 200.
    pub async fn mount_email_mock(&self) {
        Mock::given(path("/mail/send"))
            .and(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.email_server)
            .await;
    }
}

pub fn subscribe_body(email: &str, source: &str) -> serde_json::Value {
    serde_json::json!({
        "email": email,
        "source": source,
        "recaptchaToken": "placeholder"
    })
}

pub fn contact_body(name: &str, email: &str, subject: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "email": email,
        "subject": subject,
        "message": message,
        "recaptchaToken": "placeholder"
    })
}
