//! Single binary web server: the open tournament of one session behind a REST/JSON API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 127.0.0.1), PORT (e.g. 8080), DATA_DIR (saved tournaments, default ./saves).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use padel_tournament::{
    generate_schedule, record_score, MatchFormat, Score, Session, Tournament, TournamentConfig,
    TournamentError,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::RwLock;

/// One open tournament for the whole server, like the desktop app it serves.
type AppState = Data<RwLock<Session>>;

/// Server settings read from the environment at startup.
#[derive(Clone, Debug)]
struct ServerConfig {
    host: String,
    port: u16,
    data_dir: PathBuf,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("saves"));
        Self {
            host,
            port,
            data_dir,
        }
    }
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct CourtsBody {
    courts: u32,
}

#[derive(Deserialize)]
struct ScheduleBody {
    rounds: u32,
}

#[derive(Deserialize)]
struct ScoreBody {
    /// null clears the score.
    score: Option<Score>,
}

#[derive(Deserialize)]
struct FileBody {
    /// File stem under DATA_DIR; defaults to a timestamped name when saving.
    file: Option<String>,
}

#[derive(Deserialize)]
struct PlayerPath {
    name: String,
}

#[derive(Deserialize)]
struct MatchPath {
    round: u32,
    court: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::NoTournament => HttpResponse::NotFound().json(body),
        TournamentError::Storage(_) => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Run `action` on the open tournament and answer with the updated tournament.
fn update_tournament<F>(state: &AppState, action: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let result = g.current_mut().and_then(|t| {
        action(&mut *t)?;
        Ok(t)
    });
    match result {
        Ok(t) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(&e),
    }
}

/// Accept only plain file stems so saves stay inside DATA_DIR.
fn save_path(data_dir: &std::path::Path, stem: &str) -> Result<PathBuf, TournamentError> {
    let valid = !stem.is_empty()
        && stem.len() <= 64
        && stem
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(TournamentError::Storage(format!("invalid file name: {stem}")));
    }
    Ok(data_dir.join(format!("{stem}.json")))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-tournament",
    })
}

/// Create a tournament from players, courts and format, replacing the open one.
#[post("/api/tournament")]
async fn api_create_tournament(state: AppState, body: Json<TournamentConfig>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.create(body.into_inner()) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournament")]
async fn api_get_tournament(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.current() {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

#[delete("/api/tournament")]
async fn api_close_tournament(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.close() {
        Some(_) => HttpResponse::NoContent().finish(),
        None => error_response(&TournamentError::NoTournament),
    }
}

/// Add a player (discards the schedule; rejected once scores exist).
#[post("/api/tournament/players")]
async fn api_add_player(state: AppState, body: Json<AddPlayerBody>) -> HttpResponse {
    update_tournament(&state, |t| t.add_player(&body.name))
}

#[delete("/api/tournament/players/{name}")]
async fn api_remove_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    update_tournament(&state, |t| t.remove_player(&path.name))
}

#[put("/api/tournament/courts")]
async fn api_set_courts(state: AppState, body: Json<CourtsBody>) -> HttpResponse {
    update_tournament(&state, |t| t.set_courts(body.courts))
}

#[put("/api/tournament/format")]
async fn api_set_format(state: AppState, body: Json<MatchFormat>) -> HttpResponse {
    let format = body.into_inner();
    update_tournament(&state, |t| t.set_format(format))
}

/// Generate the round plan.
#[post("/api/tournament/schedule")]
async fn api_generate_schedule(state: AppState, body: Json<ScheduleBody>) -> HttpResponse {
    update_tournament(&state, |t| generate_schedule(t, body.rounds))
}

/// Set or clear the score of one match.
#[put("/api/tournament/rounds/{round}/courts/{court}/score")]
async fn api_record_score(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    update_tournament(&state, |t| record_score(t, path.round, path.court, body.score))
}

#[get("/api/tournament/rankings")]
async fn api_rankings(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.current().and_then(Tournament::rankings) {
        Ok(rankings) => HttpResponse::Ok().json(rankings),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournament/history")]
async fn api_history(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.current() {
        Ok(t) => HttpResponse::Ok().json(t.history()),
        Err(e) => error_response(&e),
    }
}

/// Write the open tournament to DATA_DIR/<file>.json.
#[post("/api/tournament/save")]
async fn api_save(state: AppState, config: Data<ServerConfig>, body: Json<FileBody>) -> HttpResponse {
    let stem = body
        .file
        .clone()
        .unwrap_or_else(|| chrono::Utc::now().format("padel-%Y%m%d-%H%M%S").to_string());
    let path = match save_path(&config.data_dir, &stem) {
        Ok(p) => p,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };
    let document = {
        let g = match state.read() {
            Ok(guard) => guard,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        };
        match g.save() {
            Ok(doc) => doc,
            Err(e) => return error_response(&e),
        }
    };
    if let Err(e) = tokio::fs::create_dir_all(&config.data_dir).await {
        return error_response(&TournamentError::Storage(e.to_string()));
    }
    if let Err(e) = tokio::fs::write(&path, document).await {
        return error_response(&TournamentError::Storage(e.to_string()));
    }
    log::info!("Saved tournament to {}", path.display());
    HttpResponse::Ok().json(serde_json::json!({ "file": stem }))
}

/// Open DATA_DIR/<file>.json, replacing the open tournament.
#[post("/api/tournament/load")]
async fn api_load(state: AppState, config: Data<ServerConfig>, body: Json<FileBody>) -> HttpResponse {
    let Some(stem) = body.file.as_deref() else {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": "file is required" }));
    };
    let path = match save_path(&config.data_dir, stem) {
        Ok(p) => p,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };
    let document = match tokio::fs::read_to_string(&path).await {
        Ok(doc) => doc,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No such save file" }));
        }
        Err(e) => return error_response(&TournamentError::Storage(e.to_string())),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.load(&document) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!(
        "Starting server at http://{}:{} (saves in {})",
        config.host,
        config.port,
        config.data_dir.display()
    );

    let bind = (config.host.clone(), config.port);
    let state: AppState = Data::new(RwLock::new(Session::new()));
    let config = Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_close_tournament)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_set_courts)
            .service(api_set_format)
            .service(api_generate_schedule)
            .service(api_record_score)
            .service(api_rankings)
            .service(api_history)
            .service(api_save)
            .service(api_load)
    })
    .bind(bind)?
    .run()
    .await
}
