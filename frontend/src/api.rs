use gloo_net::http::Request;
use shared::{ErrorResponse, PredictionRequest, PredictionResponse};

/// Posts the form values to the flow's endpoint and returns the diagnosis.
pub async fn request_prediction(request: &PredictionRequest) -> Result<PredictionResponse, String> {
    let endpoint = request.disease().endpoint();
    let response = Request::post(&endpoint)
        .json(request)
        .map_err(|e| format!("Failed to build request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.ok() {
        response
            .json::<PredictionResponse>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        let status = response.status();
        match response.json::<ErrorResponse>().await {
            Ok(body) => Err(format!("Server error: {} - {}", status, body.error)),
            Err(_) => Err(format!("Server error: {}", status)),
        }
    }
}
