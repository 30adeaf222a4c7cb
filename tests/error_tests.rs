#[cfg(test)]
mod error_tests {
    use serde_json::json;
    use symptom_screen::{Catalog, Result, ScreenError};

    #[test]
    fn test_api_error() {
        let err = ScreenError::Api("connection failed".to_string());
        assert_eq!(format!("{}", err), "API error: connection failed");
    }

    #[test]
    fn test_validation_error() {
        let err = ScreenError::Validation("Symptoms text is required".to_string());
        assert_eq!(
            format!("{}", err),
            "Validation error: Symptoms text is required"
        );
    }

    #[test]
    fn test_status_errors_carry_user_facing_messages() {
        assert_eq!(
            ScreenError::RateLimited.to_string(),
            "Rate limit exceeded. Please try again in a moment."
        );
        assert_eq!(
            ScreenError::QuotaExceeded.to_string(),
            "AI service limit reached. Please try again later."
        );
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_value::<String>(json!(42)).unwrap_err();
        let err: ScreenError = json_err.into();
        match err {
            ScreenError::Json(_) => {}
            other => panic!("Expected Json, got {:?}", other),
        }
    }

    #[test]
    fn test_result_type() {
        let ok_result: Result<i32> = Ok(42);
        assert_eq!(ok_result, Ok(42));

        let err_result: Result<i32> = Err(ScreenError::Validation("test error".to_string()));
        assert_eq!(
            err_result,
            Err(ScreenError::Validation("test error".to_string()))
        );
    }

    #[test]
    fn test_catalog_errors_surface_through_from_json() {
        let dangling = r#"{
            "diseases": [],
            "symptomWeights": {"cough": {"asthma": 0.5}}
        }"#;
        assert!(matches!(
            Catalog::from_json(dangling),
            Err(ScreenError::Catalog(_))
        ));

        assert!(matches!(
            Catalog::from_json("not json"),
            Err(ScreenError::Catalog(msg)) if msg.starts_with("failed to parse catalog JSON")
        ));
    }
}
