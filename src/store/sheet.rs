use reqwest::Client;

use super::{
    api::{
        parse_table_payload,
        RawRow,
        UpdateRequest,
        UpdateResponse,
    },
    RemoteStore,
};
use crate::core::{
    http::{
        get_text,
        http_client,
        post_json_text,
    },
    DeckError,
    DeckSettings,
};

const SHEETS_BASE: &str = "https://docs.google.com/spreadsheets/d";

/// Google Sheets read through the visualization query endpoint, written through an
/// Apps Script web app.
pub struct SheetStore {
    client: Client,
    sheet_id: String,
    update_url: Option<String>,
}

impl SheetStore {
    pub fn new(settings: &DeckSettings) -> Result<Self, DeckError> {
        Ok(Self {
            client: http_client(settings.request_timeout_secs)?,
            sheet_id: settings.sheet_id.trim().to_string(),
            update_url: settings.update_endpoint().map(str::to_string),
        })
    }

    pub fn table_url(&self) -> String {
        format!("{}/{}/gviz/tq?tqx=out:json", SHEETS_BASE, self.sheet_id)
    }
}

impl RemoteStore for SheetStore {
    async fn fetch_rows(&self) -> Result<Vec<RawRow>, DeckError> {
        if self.sheet_id.is_empty() {
            return Err(DeckError::MalformedTable("no spreadsheet id configured".to_string()));
        }
        let body = get_text(&self.client, &self.table_url()).await?;
        parse_table_payload(&body)
    }

    async fn update_flag(&self, request: &UpdateRequest) -> Result<UpdateResponse, DeckError> {
        let url = self.update_url.as_deref().ok_or(DeckError::NotConfigured)?;
        let body = post_json_text(&self.client, url, request).await?;
        UpdateResponse::parse(&body)
    }

    fn can_write(&self) -> bool {
        self.update_url.is_some()
    }
}
