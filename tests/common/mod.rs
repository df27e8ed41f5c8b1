#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use actix_multipart::Multipart;
use actix_web::{dev::ServerHandle, web, App, HttpRequest, HttpResponse, HttpServer};
use futures::StreamExt;
use serde_json::{json, Value};

use hlopg_client::ApiConfig;

pub const TEST_TOKEN: &str = "test_jwt_token";

#[derive(Debug, Clone)]
pub struct RecordedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedPart {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone)]
pub struct RecordedUpdate {
    pub hostel_id: String,
    pub authorization: Option<String>,
    pub parts: Vec<RecordedPart>,
}

impl RecordedUpdate {
    pub fn part(&self, name: &str) -> Option<&RecordedPart> {
        self.parts.iter().find(|p| p.name == name)
    }

    pub fn parts_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a RecordedPart> + 'a {
        self.parts.iter().filter(move |p| p.name == name)
    }
}

#[derive(Debug, Clone)]
pub struct RecordedBooking {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Default)]
pub struct MockState {
    pub hostels: Mutex<HashMap<String, Value>>,
    pub booking_reply: Mutex<Option<(u16, Value)>>,
    pub bookings: Mutex<Vec<RecordedBooking>>,
    pub updates: Mutex<Vec<RecordedUpdate>>,
}

/// In-process stand-in for the hostel backend.
pub struct MockBackend {
    pub base_url: String,
    pub state: web::Data<MockState>,
    handle: ServerHandle,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = web::Data::new(MockState::default());
        let app_state = state.clone();

        let server = HttpServer::new(move || {
            App::new().app_data(app_state.clone()).service(
                web::scope("/api")
                    .route("/hostel/{id}", web::get().to(get_hostel))
                    .route("/hostel/update/{id}", web::put().to(update_hostel))
                    .route("/booking/newbooking", web::post().to(new_booking)),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("mock backend should bind");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);

        Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    pub fn with_hostel(self, id: &str, record: Value) -> Self {
        self.state
            .hostels
            .lock()
            .unwrap()
            .insert(id.to_string(), record);
        self
    }

    pub fn reply_to_bookings(&self, status: u16, body: Value) {
        *self.state.booking_reply.lock().unwrap() = Some((status, body));
    }

    pub fn config(&self) -> ApiConfig {
        ApiConfig::new(&self.base_url).unwrap()
    }

    pub fn authed_config(&self) -> ApiConfig {
        self.config().with_token(TEST_TOKEN)
    }

    pub fn bookings(&self) -> Vec<RecordedBooking> {
        self.state.bookings.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<RecordedUpdate> {
        self.state.updates.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

pub fn sunrise_pg() -> Value {
    json!({
        "hostel_id": 17,
        "hostel_name": "Sunrise PG",
        "hostel_info": "Five minutes from Madhapur metro",
        "pg_type": "Men",
        "address": "Plot 9, Road 4",
        "area": "Madhapur",
        "city": "Hyderabad",
        "state": "Telangana",
        "pincode": "500081",
        "deposit": 2000,
        "sharing": {"single": 9000, "double": 6000, "triple": "4500"},
        "amenities": {"wifi": true, "tv": false, "parking": true},
        "rules": ["No Smoking"],
        "images": ["/uploads/sunrise-1.jpg"],
        "foodMenu": {
            "breakfast": {"monday": "Idli", "tuesday": "Poha"},
            "lunch": {"monday": "Thali"},
            "dinner": {}
        }
    })
}

fn authorization(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

async fn get_hostel(path: web::Path<String>, state: web::Data<MockState>) -> HttpResponse {
    let id = path.into_inner();
    match state.hostels.lock().unwrap().get(&id) {
        Some(record) => HttpResponse::Ok().json(json!({ "data": record })),
        None => HttpResponse::NotFound().json(json!({"message": "Hostel not found"})),
    }
}

async fn new_booking(
    req: HttpRequest,
    body: web::Json<Value>,
    state: web::Data<MockState>,
) -> HttpResponse {
    let authorization = authorization(&req);
    state.bookings.lock().unwrap().push(RecordedBooking {
        authorization: authorization.clone(),
        body: body.into_inner(),
    });

    if authorization.is_none() {
        return HttpResponse::Unauthorized().json(json!({"message": "Unauthorized"}));
    }

    match state.booking_reply.lock().unwrap().clone() {
        Some((status, reply)) => {
            let status = actix_web::http::StatusCode::from_u16(status).unwrap();
            HttpResponse::build(status).json(reply)
        }
        None => HttpResponse::Ok().json(json!({"success": true, "bookingId": 101})),
    }
}

async fn update_hostel(
    req: HttpRequest,
    path: web::Path<String>,
    mut payload: Multipart,
    state: web::Data<MockState>,
) -> Result<HttpResponse, actix_web::Error> {
    let hostel_id = path.into_inner();
    if !state.hostels.lock().unwrap().contains_key(&hostel_id) {
        return Ok(HttpResponse::NotFound().json(json!({"message": "Hostel not found"})));
    }

    let mut parts = Vec::new();
    while let Some(field) = payload.next().await {
        let mut field = field?;
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(String::from);
        let content_type = field.content_type().map(|m| m.to_string());

        let mut body = Vec::new();
        while let Some(chunk) = field.next().await {
            body.extend_from_slice(&chunk?);
        }
        parts.push(RecordedPart {
            name,
            file_name,
            content_type,
            body,
        });
    }

    state.updates.lock().unwrap().push(RecordedUpdate {
        hostel_id,
        authorization: authorization(&req),
        parts,
    });
    Ok(HttpResponse::Ok().json(json!({"success": true, "message": "PG updated"})))
}
