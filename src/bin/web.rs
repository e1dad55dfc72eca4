//! Single binary web server: JSON API over the pairing engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use tournament_pairing_web::{
    advance_cycle, is_current_cycle_complete, read_roster_from, record_result, resolve_ties,
    start_tournament, write_template_to, EncounterResult, MemoryStore, PairingSystem, Tournament,
    TournamentError, TournamentId,
};

/// Per-tournament entry: tournament data plus its own store instance.
struct TournamentEntry {
    tournament: Tournament,
    store: MemoryStore,
}

/// In-memory state: many tournaments by id. Writes take the lock exclusively,
/// so pairing and tie-break passes for one tournament never interleave.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default = "default_system")]
    system: PairingSystem,
    start_date: Option<NaiveDate>,
    #[serde(default = "default_bye_name")]
    bye_name: String,
    #[serde(default)]
    tie_breakers: Vec<String>,
}

fn default_system() -> PairingSystem {
    PairingSystem::Swiss
}

fn default_bye_name() -> String {
    "Bye".to_string()
}

#[derive(Deserialize)]
struct AddParticipantBody {
    name: String,
    #[serde(default)]
    score: f64,
}

#[derive(Deserialize)]
struct RecordResultBody {
    cycle: u32,
    number: u32,
    result: EncounterResult,
    #[serde(default)]
    initial_marker: f64,
    #[serde(default)]
    final_marker: f64,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Map a library error to an HTTP response with a JSON error body.
fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::ParticipantNotFound(_)
        | TournamentError::CycleNotFound(_)
        | TournamentError::EncounterNotFound { .. } => HttpResponse::NotFound().json(body),
        TournamentError::Persistence(_) => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-pairing-web",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let start_date = body
        .start_date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let mut tournament = Tournament::new(
        body.name.clone(),
        body.system,
        start_date,
        body.bye_name.clone(),
    );
    tournament.tie_breakers = body.tie_breakers.clone();
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        TournamentEntry {
            tournament,
            store: MemoryStore::new(),
        },
    );
    match g.get(&id) {
        Some(entry) => HttpResponse::Ok().json(&entry.tournament),
        None => HttpResponse::InternalServerError().body("state error"),
    }
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&path.id) {
        Some(entry) => HttpResponse::Ok().json(&entry.tournament),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Register a participant.
#[post("/api/tournaments/{id}/participants")]
async fn api_add_participant(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddParticipantBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    let t = &mut entry.tournament;
    match t.add_participant_with_score(body.name.trim(), body.score) {
        Ok(_) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Import participants from a CSV roster body (header must be Name,Score).
#[post("/api/tournaments/{id}/roster")]
async fn api_import_roster(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    let entries = match read_roster_from(body.as_bytes()) {
        Ok(entries) => entries,
        Err(e) => return error_response(&e),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    let t = &mut entry.tournament;
    for row in entries {
        if let Err(e) = t.add_participant_with_score(row.name, row.score) {
            return error_response(&e);
        }
    }
    HttpResponse::Ok().json(t)
}

/// Download the empty roster template (header row only).
#[get("/api/roster/template")]
async fn api_roster_template() -> HttpResponse {
    let mut out = Vec::new();
    match write_template_to(&mut out) {
        Ok(()) => HttpResponse::Ok().content_type("text/csv").body(out),
        Err(e) => error_response(&e),
    }
}

/// Start the tournament: validates the roster and generates cycle 1.
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    match start_tournament(&mut entry.tournament, &mut entry.store) {
        Ok(()) => HttpResponse::Ok().json(&entry.tournament),
        Err(e) => error_response(&e),
    }
}

/// Advance to the next cycle.
#[post("/api/tournaments/{id}/advance")]
async fn api_advance_cycle(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    match advance_cycle(&mut entry.tournament, &mut entry.store) {
        Ok(()) => HttpResponse::Ok().json(&entry.tournament),
        Err(e) => error_response(&e),
    }
}

/// Record a result for one encounter of a cycle.
#[put("/api/tournaments/{id}/results")]
async fn api_record_result(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RecordResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    match record_result(
        &mut entry.tournament,
        body.cycle,
        body.number,
        body.result,
        body.initial_marker,
        body.final_marker,
    ) {
        Ok(()) => HttpResponse::Ok().json(&entry.tournament),
        Err(e) => error_response(&e),
    }
}

/// Current standings: the roster in ranking order.
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&path.id) {
        Some(entry) => HttpResponse::Ok().json(&entry.tournament.participants),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Apply the tie-break chain and install the re-ranked roster.
#[post("/api/tournaments/{id}/ties/resolve")]
async fn api_resolve_ties(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    let t = &mut entry.tournament;
    let encounters = t.all_encounters();
    t.participants = resolve_ties(
        &t.participants,
        &encounters,
        &t.tie_breakers,
        t.cycles.len(),
        t.win_points,
    );
    HttpResponse::Ok().json(&t.participants)
}

/// Whether the current cycle has all results captured.
#[get("/api/tournaments/{id}/cycles/current/complete")]
async fn api_cycle_complete(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    match is_current_cycle_complete(&entry.tournament) {
        Ok(complete) => HttpResponse::Ok().json(serde_json::json!({ "complete": complete })),
        Err(e) => error_response(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_participant)
            .service(api_import_roster)
            .service(api_roster_template)
            .service(api_start_tournament)
            .service(api_advance_cycle)
            .service(api_record_result)
            .service(api_standings)
            .service(api_resolve_ties)
            .service(api_cycle_complete)
    })
    .bind(bind)?
    .run()
    .await
}
