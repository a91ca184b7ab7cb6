use crate::document::Parameter;
use crate::error::FilterError;

use super::ParameterFilterContext;

/// Fill a missing description from the bound model's metadata.
///
/// An existing description always wins.
pub fn fill_description(
    parameter: &mut Parameter,
    ctx: &ParameterFilterContext<'_>,
) -> Result<(), FilterError> {
    if parameter.description.is_none() {
        parameter.description = ctx.api_parameter.model_description.clone();
    }
    Ok(())
}

/// Mark route-bound parameters that are not optional as required.
///
/// `required` is only ever raised, never cleared. Without route info the flag
/// is left as declared.
pub fn merge_required(
    parameter: &mut Parameter,
    ctx: &ParameterFilterContext<'_>,
) -> Result<(), FilterError> {
    if let Some(route) = ctx.api_parameter.route {
        parameter.required |= !route.optional;
    }
    Ok(())
}
