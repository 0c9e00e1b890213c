//! Attachment entity - Referencia a un archivo adjunto

use serde::{Deserialize, Serialize};

/// El binario vive en el backend; al cliente solo llegan id y nombre.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentRef {
    pub id: String,
    pub file_name: String,
}
