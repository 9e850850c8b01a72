// Handle-based C ABI. Each handle is an independent engine; the caller owns it
// and frees it with `braille_engine_free`. Strings returned here are JSON or
// plain UTF-8 and must be released with `braille_free_string`.
use crate::core::engine::BrailleEngine;
use crate::core::lexicon::Lexicon;
use crate::config::EngineConfig;
use serde::Serialize;
use std::ffi::{c_char, CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;
use std::sync::Arc;
use tracing::error;

fn to_c_string(s: String) -> *mut c_char {
    // Interior NULs cannot occur in codec output or JSON, but never panic across FFI.
    CString::new(s).map_or(ptr::null_mut(), CString::into_raw)
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

unsafe fn read_str<'a>(s: *const c_char) -> &'a str {
    if s.is_null() {
        return "";
    }
    CStr::from_ptr(s).to_str().unwrap_or("")
}

/// Creates an engine over the built-in lexicon. `config_json` may be null for defaults.
/// Returns null if the config is invalid.
#[no_mangle]
pub extern "C" fn braille_engine_new(config_json: *const c_char) -> *mut BrailleEngine {
    let result = catch_unwind(|| {
        let config = if config_json.is_null() {
            EngineConfig::default()
        } else {
            let json = unsafe { read_str(config_json) };
            match EngineConfig::from_json_str(json) {
                Ok(config) => config,
                Err(e) => {
                    error!(error = %e, "rejected engine config");
                    return ptr::null_mut();
                }
            }
        };
        let engine = BrailleEngine::new(Arc::new(Lexicon::default_english()), &config);
        Box::into_raw(Box::new(engine))
    });
    result.unwrap_or_else(|_| {
        error!("panic during engine creation");
        ptr::null_mut()
    })
}

/// # Safety
/// `engine` must come from `braille_engine_new` and not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn braille_engine_free(engine: *mut BrailleEngine) {
    if !engine.is_null() {
        drop(Box::from_raw(engine));
    }
}

/// JSON array of suggestion strings.
///
/// # Safety
/// `engine` must be a live handle; `text` a NUL-terminated string or null.
#[no_mangle]
pub unsafe extern "C" fn braille_get_suggestions(
    engine: *const BrailleEngine,
    text: *const c_char,
    limit: u32,
) -> *mut c_char {
    let text = read_str(text);
    let result = catch_unwind(AssertUnwindSafe(|| match engine.as_ref() {
        Some(engine) => to_json(&engine.get_suggestions(text, limit as usize)),
        None => "[]".to_string(),
    }));
    to_c_string(result.unwrap_or_else(|_| {
        error!("panic in get_suggestions");
        "[]".to_string()
    }))
}

/// # Safety
/// `engine` must be a live handle; `word` a NUL-terminated string or null.
#[no_mangle]
pub unsafe extern "C" fn braille_record_accepted(engine: *mut BrailleEngine, word: *const c_char) {
    let word = read_str(word);
    if word.is_empty() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        if let Some(engine) = engine.as_mut() {
            engine.record_accepted(word);
        }
    }));
}

/// # Safety
/// `engine` must be a live handle; `text` a NUL-terminated string or null.
#[no_mangle]
pub unsafe extern "C" fn braille_encode_word(engine: *const BrailleEngine, text: *const c_char) -> *mut c_char {
    let text = read_str(text);
    match engine.as_ref() {
        Some(engine) => to_c_string(engine.encode_word(text)),
        None => ptr::null_mut(),
    }
}

/// # Safety
/// `engine` must be a live handle; `pattern` a NUL-terminated string or null.
#[no_mangle]
pub unsafe extern "C" fn braille_decode_word(engine: *const BrailleEngine, pattern: *const c_char) -> *mut c_char {
    let pattern = read_str(pattern);
    match engine.as_ref() {
        Some(engine) => to_c_string(engine.decode_word(pattern)),
        None => ptr::null_mut(),
    }
}

/// Accepts `word` for the in-progress word and returns its Braille pattern.
///
/// # Safety
/// `engine` must be a live handle; `word` a NUL-terminated string or null.
#[no_mangle]
pub unsafe extern "C" fn braille_accept_suggestion(engine: *mut BrailleEngine, word: *const c_char) -> *mut c_char {
    let word = read_str(word);
    if word.trim().is_empty() {
        return ptr::null_mut();
    }
    let result = catch_unwind(AssertUnwindSafe(|| engine.as_mut().map(|engine| engine.accept_suggestion(word))));
    match result {
        Ok(Some(pattern)) => to_c_string(pattern),
        Ok(None) => ptr::null_mut(),
        Err(_) => {
            error!("panic in accept_suggestion");
            ptr::null_mut()
        }
    }
}

/// Clears typed text and any partial chord; history survives.
///
/// # Safety
/// `engine` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn braille_reset(engine: *mut BrailleEngine) {
    if let Some(engine) = engine.as_mut() {
        engine.reset();
    }
}

/// # Safety
/// `engine` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn braille_live_text(engine: *const BrailleEngine) -> *mut c_char {
    match engine.as_ref() {
        Some(engine) => to_c_string(engine.live_text().to_string()),
        None => ptr::null_mut(),
    }
}

/// Canonical cell text typed so far.
///
/// # Safety
/// `engine` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn braille_buffer(engine: *const BrailleEngine) -> *mut c_char {
    match engine.as_ref() {
        Some(engine) => to_c_string(engine.braille_buffer().to_string()),
        None => ptr::null_mut(),
    }
}

unsafe fn key_event(
    engine: *mut BrailleEngine,
    key: u32,
    handler: fn(&mut BrailleEngine, char) -> crate::core::types::KeyResponse,
) -> *mut c_char {
    let Some(key) = char::from_u32(key) else {
        return ptr::null_mut();
    };
    let result = catch_unwind(AssertUnwindSafe(|| {
        engine.as_mut().map(|engine| to_json(&handler(engine, key)))
    }));
    match result {
        Ok(Some(json)) => to_c_string(json),
        Ok(None) => ptr::null_mut(),
        Err(_) => {
            error!("panic in key handler");
            ptr::null_mut()
        }
    }
}

/// JSON `KeyResponse` for a key press. `key` is a Unicode scalar value.
///
/// # Safety
/// `engine` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn braille_key_down(engine: *mut BrailleEngine, key: u32) -> *mut c_char {
    key_event(engine, key, BrailleEngine::on_key_down)
}

/// # Safety
/// `engine` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn braille_key_up(engine: *mut BrailleEngine, key: u32) -> *mut c_char {
    key_event(engine, key, BrailleEngine::on_key_up)
}

/// Fires a due debounced chord. Call from a timer after key releases.
///
/// # Safety
/// `engine` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn braille_poll(engine: *mut BrailleEngine) -> *mut c_char {
    let result = catch_unwind(AssertUnwindSafe(|| engine.as_mut().map(|engine| to_json(&engine.poll()))));
    match result {
        Ok(Some(json)) => to_c_string(json),
        _ => ptr::null_mut(),
    }
}

/// # Safety
/// `s` must come from this library, or be null.
#[no_mangle]
pub unsafe extern "C" fn braille_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe fn take(s: *mut c_char) -> String {
        assert!(!s.is_null());
        let out = CStr::from_ptr(s).to_str().unwrap().to_string();
        braille_free_string(s);
        out
    }

    #[test]
    fn suggestions_round_trip_through_json() {
        unsafe {
            let engine = braille_engine_new(ptr::null());
            assert!(!engine.is_null());
            let text = CString::new("helo").unwrap();
            let json = take(braille_get_suggestions(engine, text.as_ptr(), 5));
            let words: Vec<String> = serde_json::from_str(&json).unwrap();
            assert!(words.contains(&"hello".to_string()));
            braille_engine_free(engine);
        }
    }

    #[test]
    fn chord_through_handle() {
        unsafe {
            let config = CString::new(r#"{"debounce_ms": 0}"#).unwrap();
            let engine = braille_engine_new(config.as_ptr());
            take(braille_key_down(engine, 'd' as u32));
            take(braille_key_down(engine, 'w' as u32));
            take(braille_key_up(engine, 'd' as u32));
            let json = take(braille_key_up(engine, 'w' as u32));
            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            assert_eq!(value["events"][0]["kind"], "character");
            assert_eq!(value["events"][0]["ch"], "b");
            braille_engine_free(engine);
        }
    }

    #[test]
    fn codec_through_handle() {
        unsafe {
            let engine = braille_engine_new(ptr::null());
            let word = CString::new("dot").unwrap();
            let pattern = take(braille_encode_word(engine, word.as_ptr()));
            assert_eq!(pattern, "145 135 2345");
            let pattern = CString::new(pattern).unwrap();
            assert_eq!(take(braille_decode_word(engine, pattern.as_ptr())), "dot");
            braille_engine_free(engine);
        }
    }

    #[test]
    fn typed_state_through_handle() {
        unsafe {
            let config = CString::new(r#"{"debounce_ms": 0}"#).unwrap();
            let engine = braille_engine_new(config.as_ptr());
            // "h" is dots 1-2-5: d w o
            for key in ['d', 'w', 'o'] {
                take(braille_key_down(engine, key as u32));
            }
            for key in ['d', 'w', 'o'] {
                take(braille_key_up(engine, key as u32));
            }
            assert_eq!(take(braille_live_text(engine)), "h");
            assert_eq!(take(braille_buffer(engine)), "125");

            let word = CString::new("hello").unwrap();
            let pattern = take(braille_accept_suggestion(engine, word.as_ptr()));
            assert_eq!(pattern, "125 15 123 123 135");
            assert_eq!(take(braille_live_text(engine)), "hello");
            assert_eq!(take(braille_buffer(engine)), pattern);

            braille_reset(engine);
            assert_eq!(take(braille_live_text(engine)), "");
            assert_eq!(take(braille_buffer(engine)), "");
            braille_engine_free(engine);
        }
    }

    #[test]
    fn invalid_config_yields_null() {
        let config = CString::new(r#"{"key_bindings": {}}"#).unwrap();
        assert!(braille_engine_new(config.as_ptr()).is_null());
    }

    #[test]
    fn null_engine_is_harmless() {
        unsafe {
            let text = CString::new("hel").unwrap();
            assert_eq!(take(braille_get_suggestions(ptr::null(), text.as_ptr(), 5)), "[]");
            assert!(braille_key_down(ptr::null_mut(), 'd' as u32).is_null());
            braille_record_accepted(ptr::null_mut(), text.as_ptr());
            assert!(braille_accept_suggestion(ptr::null_mut(), text.as_ptr()).is_null());
            assert!(braille_live_text(ptr::null()).is_null());
            assert!(braille_buffer(ptr::null()).is_null());
            braille_reset(ptr::null_mut());
        }
    }
}
