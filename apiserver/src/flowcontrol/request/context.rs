use std::cell::Ref;

use actix_web::{HttpMessage, HttpRequest, web};
use shared::api::{ListOptions, RequestInfo};

use crate::errors::FlowControlError;

/// Borrows the request info the routing layer attached to the request, if any.
pub fn request_info_from(req: &HttpRequest) -> Option<Ref<'_, RequestInfo>> {
    Ref::filter_map(req.extensions(), |ext| ext.get::<RequestInfo>()).ok()
}

/// Attaches resolved request info to the request.
pub fn with_request_info(req: &HttpRequest, info: RequestInfo) {
    req.extensions_mut().insert(info);
}

/// Converts the raw query string into list options.
///
/// Pairs are decoded in order so repeated keys resolve the way the list handler does.
pub fn list_options_from(req: &HttpRequest) -> Result<ListOptions, FlowControlError> {
    let pairs = web::Query::<Vec<(String, String)>>::from_query(req.query_string())
        .map_err(|e| FlowControlError::InvalidListOptions(e.to_string()))?
        .into_inner();

    ListOptions::from_query_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .map_err(|e| FlowControlError::InvalidListOptions(e.to_string()))
}
