use crate::document::{Operation, Parameter, ParameterLocation, Schema};
use crate::error::FilterError;

use super::OperationFilterContext;

pub const ACCEPT_LANGUAGE: &str = "Accept-Language";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "pt-BR";

/// Operation filter declaring an optional `Accept-Language` header.
///
/// An existing declaration (matched case-insensitively) is normalized in
/// place: duplicates collapse into the first one, the name becomes
/// `Accept-Language` and a missing example is filled. `required` only ever
/// goes from false to true.
pub fn accept_language_header(
    example: &str,
) -> impl Fn(&mut Operation, &OperationFilterContext<'_>) -> Result<(), FilterError>
+ Send
+ Sync
+ 'static {
    let example = serde_json::Value::String(example.to_string());
    move |operation: &mut Operation, _ctx: &OperationFilterContext<'_>| {
        let is_header = |p: &Parameter| p.matches(ACCEPT_LANGUAGE, ParameterLocation::Header);

        let Some(first) = operation.parameters.iter().position(is_header) else {
            operation.parameters.push(Parameter {
                schema: Some(Schema::of_type("string")),
                example: Some(example.clone()),
                ..Parameter::new(ACCEPT_LANGUAGE, ParameterLocation::Header)
            });
            return Ok(());
        };

        let mut merged = operation.parameters[first].clone();
        let mut index = 0;
        operation.parameters.retain(|p| {
            let keep = index <= first || !is_header(p);
            if !keep {
                merged.required |= p.required;
                if merged.example.is_none() {
                    merged.example = p.example.clone();
                }
                if merged.description.is_none() {
                    merged.description = p.description.clone();
                }
            }
            index += 1;
            keep
        });

        merged.name = ACCEPT_LANGUAGE.to_string();
        if merged.example.is_none() {
            merged.example = Some(example.clone());
        }
        if merged.schema.is_none() {
            merged.schema = Some(Schema::of_type("string"));
        }
        operation.parameters[first] = merged;
        Ok(())
    }
}
