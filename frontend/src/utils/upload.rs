use crate::api::ProofAttachment;

pub const MAX_PROOF_BYTES: usize = 5 * 1024 * 1024;

/// Images and PDFs up to 5 MB.
pub fn check_proof(mime_type: &str, size: usize) -> Result<(), String> {
    let accepted = mime_type.starts_with("image/") || mime_type == "application/pdf";
    if !accepted {
        return Err("Proof must be an image or a PDF".into());
    }
    if size > MAX_PROOF_BYTES {
        return Err("Proof must be 5 MB or smaller".into());
    }
    Ok(())
}

/// First file chosen in the `<input type="file">` that fired `ev`, read into memory.
#[cfg(target_arch = "wasm32")]
pub async fn read_selected_file(ev: &leptos::ev::Event) -> Result<Option<ProofAttachment>, String> {
    use wasm_bindgen::JsCast;

    let Some(file) = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
    else {
        return Ok(None);
    };
    check_proof(&file.type_(), file.size() as usize)?;
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| "Could not read the selected file".to_string())?;
    Ok(Some(ProofAttachment {
        file_name: file.name(),
        mime_type: file.type_(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    }))
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn read_selected_file(_ev: &leptos::ev::Event) -> Result<Option<ProofAttachment>, String> {
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_images_and_pdfs_within_limit() {
        assert!(check_proof("image/png", 1024).is_ok());
        assert!(check_proof("application/pdf", MAX_PROOF_BYTES).is_ok());
        assert_eq!(
            check_proof("text/plain", 10),
            Err("Proof must be an image or a PDF".to_string())
        );
        assert!(check_proof("image/jpeg", MAX_PROOF_BYTES + 1).is_err());
    }
}
