//! Selected hostnames: the hostnames a configuration version protects.
//!
//! All three operations target the same resource,
//! `/appsec/v1/configs/{configId}/versions/{version}/selected-hostnames`.
//! The two reads are the same wire call under two names.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::client::AppSecClient;
use crate::error::{ErrorMapper, Result};
use crate::http::{Executor, HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    GetSelectedHostnameRequest, GetSelectedHostnameResponse, GetSelectedHostnamesRequest,
    GetSelectedHostnamesResponse, UpdateSelectedHostnameRequest, UpdateSelectedHostnameResponse,
};

const GET_SELECTED_HOSTNAMES: &str = "GetSelectedHostnames";
const GET_SELECTED_HOSTNAME: &str = "GetSelectedHostname";
const UPDATE_SELECTED_HOSTNAME: &str = "UpdateSelectedHostname";

const OK: u16 = 200;
const CREATED: u16 = 201;

/// Retrieves and replaces the list of hostnames protected under a
/// configuration version.
pub trait SelectedHostname {
    /// Lists the selected hostnames.
    fn get_selected_hostnames(
        &self,
        cancel: &CancellationToken,
        params: &GetSelectedHostnamesRequest,
    ) -> Result<GetSelectedHostnamesResponse>;

    /// Same call as [`SelectedHostname::get_selected_hostnames`].
    fn get_selected_hostname(
        &self,
        cancel: &CancellationToken,
        params: &GetSelectedHostnameRequest,
    ) -> Result<GetSelectedHostnameResponse>;

    /// Replaces the selected hostnames. The response carries the server's
    /// resulting list.
    fn update_selected_hostname(
        &self,
        cancel: &CancellationToken,
        params: &UpdateSelectedHostnameRequest,
    ) -> Result<UpdateSelectedHostnameResponse>;
}

fn resource_path(config_id: i64, version: i64) -> String {
    format!("/appsec/v1/configs/{config_id}/versions/{version}/selected-hostnames")
}

impl<E, M> AppSecClient<E, M> {
    pub fn build_get_selected_hostnames(
        &self,
        params: &GetSelectedHostnamesRequest,
    ) -> Result<HttpRequest> {
        params.validate()?;
        Ok(self.request(
            HttpMethod::Get,
            &resource_path(params.config_id, params.version),
        ))
    }

    pub fn build_get_selected_hostname(
        &self,
        params: &GetSelectedHostnameRequest,
    ) -> Result<HttpRequest> {
        params.validate()?;
        Ok(self.request(
            HttpMethod::Get,
            &resource_path(params.config_id, params.version),
        ))
    }

    pub fn build_update_selected_hostname(
        &self,
        params: &UpdateSelectedHostnameRequest,
    ) -> Result<HttpRequest> {
        params.validate()?;
        self.json_request(
            UPDATE_SELECTED_HOSTNAME,
            HttpMethod::Put,
            &resource_path(params.config_id, params.version),
            params,
        )
    }
}

impl<E, M: ErrorMapper> AppSecClient<E, M> {
    pub fn parse_get_selected_hostnames(
        &self,
        response: HttpResponse,
    ) -> Result<GetSelectedHostnamesResponse> {
        self.parse(GET_SELECTED_HOSTNAMES, response, &[OK])
    }

    pub fn parse_get_selected_hostname(
        &self,
        response: HttpResponse,
    ) -> Result<GetSelectedHostnameResponse> {
        self.parse(GET_SELECTED_HOSTNAME, response, &[OK])
    }

    pub fn parse_update_selected_hostname(
        &self,
        response: HttpResponse,
    ) -> Result<UpdateSelectedHostnameResponse> {
        self.parse(UPDATE_SELECTED_HOSTNAME, response, &[OK, CREATED])
    }
}

impl<E: Executor, M: ErrorMapper> SelectedHostname for AppSecClient<E, M> {
    fn get_selected_hostnames(
        &self,
        cancel: &CancellationToken,
        params: &GetSelectedHostnamesRequest,
    ) -> Result<GetSelectedHostnamesResponse> {
        let req = self.build_get_selected_hostnames(params)?;
        debug!(
            config_id = params.config_id,
            version = params.version,
            "GetSelectedHostnames"
        );
        let resp = self.send(GET_SELECTED_HOSTNAMES, req, cancel)?;
        self.parse_get_selected_hostnames(resp)
    }

    fn get_selected_hostname(
        &self,
        cancel: &CancellationToken,
        params: &GetSelectedHostnameRequest,
    ) -> Result<GetSelectedHostnameResponse> {
        let req = self.build_get_selected_hostname(params)?;
        debug!(
            config_id = params.config_id,
            version = params.version,
            "GetSelectedHostname"
        );
        let resp = self.send(GET_SELECTED_HOSTNAME, req, cancel)?;
        self.parse_get_selected_hostname(resp)
    }

    fn update_selected_hostname(
        &self,
        cancel: &CancellationToken,
        params: &UpdateSelectedHostnameRequest,
    ) -> Result<UpdateSelectedHostnameResponse> {
        let req = self.build_update_selected_hostname(params)?;
        debug!(
            config_id = params.config_id,
            version = params.version,
            hostnames = params.hostname_list.len(),
            "UpdateSelectedHostname"
        );
        let resp = self.send(UPDATE_SELECTED_HOSTNAME, req, cancel)?;
        self.parse_update_selected_hostname(resp)
    }
}
