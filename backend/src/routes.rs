use actix_files::Files;
use actix_web::{HttpResponse, error, web};
use log::{error, info, warn};
use shared::{
    DiabetesInput, Diagnosis, Disease, DiseaseInfo, ErrorResponse, HealthResponse, HeartInput,
    ParkinsonsInput, PredictionResponse,
};
use std::path::PathBuf;
use uuid::Uuid;

use crate::inference::predictor;
use crate::inference::{InferenceError, ModelStore};

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: PathBuf) {
    configure_api(cfg);
    cfg.service(Files::new("/", frontend_dir).index_file("index.html"));
}

pub fn configure_api(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        warn!("Rejected request body: {}", message);
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse { error: message }),
        )
        .into()
    });

    cfg.app_data(json_config)
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/diseases").route(web::get().to(list_diseases)))
        .service(web::resource("/api/predict/diabetes").route(web::post().to(predict_diabetes)))
        .service(web::resource("/api/predict/heart").route(web::post().to(predict_heart)))
        .service(web::resource("/api/predict/parkinsons").route(web::post().to(predict_parkinsons)));
}

async fn health(store: web::Data<ModelStore>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".into(),
        models: store.summaries(),
    })
}

async fn list_diseases() -> HttpResponse {
    let diseases: Vec<DiseaseInfo> = Disease::all().map(DiseaseInfo::from).collect();
    HttpResponse::Ok().json(diseases)
}

async fn predict_diabetes(store: web::Data<ModelStore>, input: web::Json<DiabetesInput>) -> HttpResponse {
    respond(Disease::Diabetes, predictor::predict_diabetes(&store, &input))
}

async fn predict_heart(store: web::Data<ModelStore>, input: web::Json<HeartInput>) -> HttpResponse {
    if let Err(e) = input.validate() {
        warn!("Rejected heart input: {}", e);
        return HttpResponse::BadRequest().json(ErrorResponse { error: e.to_string() });
    }
    respond(Disease::Heart, predictor::predict_heart(&store, &input))
}

async fn predict_parkinsons(store: web::Data<ModelStore>, input: web::Json<ParkinsonsInput>) -> HttpResponse {
    respond(Disease::Parkinsons, predictor::predict_parkinsons(&store, &input))
}

fn respond(disease: Disease, result: Result<Diagnosis, InferenceError>) -> HttpResponse {
    let request_id = Uuid::new_v4();
    match result {
        Ok(diagnosis) => {
            info!("[{}] {} prediction: positive={}", request_id, disease, diagnosis.positive);
            HttpResponse::Ok().json(PredictionResponse {
                request_id: request_id.to_string(),
                disease,
                diagnosis: diagnosis.message().to_string(),
                positive: diagnosis.positive,
            })
        }
        Err(e) => {
            let error_msg = format!("Model inference error: {}", e);
            error!("[{}] {}", request_id, error_msg);
            HttpResponse::InternalServerError().json(ErrorResponse { error: error_msg })
        }
    }
}
