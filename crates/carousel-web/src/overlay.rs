//! The detail view: a DOM overlay showing the selected item.

use crate::app::is_image_ref;
use crate::constants::{DETAIL_CAPTION_ID, DETAIL_IMAGE_ID, DETAIL_OVERLAY_ID};
use web_sys as web;

pub fn show_detail(document: &web::Document, index: usize, count: usize, reference: &str) {
    if let Some(img) = document.get_element_by_id(DETAIL_IMAGE_ID) {
        if is_image_ref(reference) {
            _ = img.set_attribute("src", reference);
            _ = img.class_list().remove_1("hidden");
        } else {
            _ = img.remove_attribute("src");
            _ = img.class_list().add_1("hidden");
        }
    }
    if let Some(caption) = document.get_element_by_id(DETAIL_CAPTION_ID) {
        caption.set_text_content(Some(&format!("{} / {}", index + 1, count)));
    }
    if let Some(el) = document.get_element_by_id(DETAIL_OVERLAY_ID) {
        _ = el.class_list().remove_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

pub fn hide_detail(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(DETAIL_OVERLAY_ID) {
        _ = el.class_list().add_1("hidden");
        _ = el.set_attribute("style", "display:none");
    }
}
