use serde::Deserialize;

#[derive(Deserialize)]
/// Request payload for the URL submission endpoint. `urls` is free text that
/// may contain several URLs separated by newlines, commas or semicolons.
pub struct AddUrlsRequest {
    #[serde(default)]
    pub urls: String,
}

#[derive(Deserialize)]
/// Request payload for the anonymize toggle endpoint. The flag arrives as the
/// string `"true"` or `"false"` (checkbox form serialization); anything else
/// is treated as `false`.
pub struct AnonymizeRequest {
    #[serde(default)]
    pub anonymize: String,
}

impl AnonymizeRequest {
    pub fn flag(&self) -> bool {
        self.anonymize == "true"
    }
}
