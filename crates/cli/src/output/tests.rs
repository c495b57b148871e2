use super::*;

#[derive(Debug, Serialize)]
struct ShotData {
	port: String,
	shots: u32,
}

#[test]
fn result_builder_success() {
	let result = ResultBuilder::new("capture")
		.data(ShotData {
			port: "0".into(),
			shots: 1,
		})
		.build();

	assert!(result.ok);
	assert_eq!(result.command, "capture");
	assert_eq!(result.schema_version, Some(SCHEMA_VERSION));
	assert!(result.data.is_some());
	assert!(result.error.is_none());
	assert!(result.timings.is_some());
}

#[test]
fn result_builder_command_error() {
	let result: CommandResult<ShotData> = ResultBuilder::new("capture")
		.command_error(CommandError {
			code: ErrorCode::SessionError,
			message: "session is not open".into(),
			details: Some(serde_json::json!({ "statusCode": 0x2003 })),
		})
		.build();

	assert!(!result.ok);
	assert!(result.data.is_none());
	let json = serde_json::to_value(&result).unwrap();
	assert_eq!(json["error"]["code"], "SESSION_ERROR");
	assert_eq!(json["error"]["message"], "session is not open");
	assert_eq!(json["error"]["details"]["statusCode"], 0x2003);
	assert!(json.get("data").is_none());
}

#[test]
fn result_without_data_is_not_ok() {
	let result: CommandResult<ShotData> = ResultBuilder::new("capture").build();
	assert!(!result.ok);
}

#[test]
fn error_code_display_matches_serde() {
	for code in [ErrorCode::LiveViewState, ErrorCode::EnumerationFailed, ErrorCode::SdkLifecycle] {
		let json = serde_json::to_value(code).unwrap();
		assert_eq!(json.as_str().unwrap(), code.to_string());
	}
}

#[test]
fn envelope_serializes_camel_case() {
	let result = ResultBuilder::new("devices").data(serde_json::json!({ "count": 0 })).build();
	let json = serde_json::to_value(&result).unwrap();

	assert_eq!(json["schemaVersion"], SCHEMA_VERSION);
	assert_eq!(json["ok"], true);
	assert!(json["timings"]["durationMs"].is_u64());
	assert!(json.get("error").is_none());
}

#[test]
fn output_format_parse() {
	assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
	assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
	assert!("yaml".parse::<OutputFormat>().is_err());
}
