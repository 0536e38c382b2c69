//! SCORM 1.2 runtime script and HTML injection
//!
//! The injected script finds the LMS `API` object, initializes the attempt,
//! and reports completion. Its lifecycle only moves forward:
//!
//! ```text
//! Uninitialized --LMSInitialize ok--> Initialized --complete()--> Finished
//! ```
//!
//! Discovery checks `window`, then walks `parent` (bounded by
//! `max_parent_hops`), then `top`, then `opener`. Initialization is retried on
//! a fixed interval because the frame that provides the API may load after the
//! content. Every call into the host is wrapped so a misbehaving LMS cannot
//! break the hosted page.

use crate::config::RuntimeOptions;
use serde::Serialize;

/// Attribute carried by the injected `<script>` tag; appears once per injection
pub const RUNTIME_MARKER: &str = r#"data-scorm-runtime="1.2""#;

/// Tag the script is inserted before (first occurrence, case-sensitive)
const BODY_CLOSE: &str = "</body>";

/// Runtime body, invoked with a JSON options object
const RUNTIME_JS: &str = r#"(function (cfg) {
  var UNINITIALIZED = 0, INITIALIZED = 1, FINISHED = 2;
  var state = UNINITIALIZED;
  var api = null;
  var attempts = 0;

  function hasApi(win) {
    try {
      return !!(win && win.API && typeof win.API.LMSInitialize === "function");
    } catch (e) {
      return false;
    }
  }

  function walk(win) {
    var hops = 0;
    try {
      while (win && !hasApi(win) && win.parent && win.parent !== win) {
        if (++hops > cfg.maxParentHops) {
          return null;
        }
        win = win.parent;
      }
      return hasApi(win) ? win.API : null;
    } catch (e) {
      return null;
    }
  }

  function discover() {
    if (api) {
      return api;
    }
    var found = walk(window);
    try {
      if (!found && window.top && window.top !== window) {
        found = walk(window.top);
      }
    } catch (e) {}
    try {
      if (!found && window.opener) {
        found = walk(window.opener);
      }
    } catch (e) {}
    api = found;
    return api;
  }

  function call(method, args) {
    try {
      return api[method].apply(api, args);
    } catch (e) {
      return "";
    }
  }

  function ok(result) {
    return result === true || String(result) === "true";
  }

  function initialize() {
    if (state !== UNINITIALIZED) {
      return true;
    }
    if (!discover() || !ok(call("LMSInitialize", [""]))) {
      return false;
    }
    state = INITIALIZED;
    var status = call("LMSGetValue", ["cmi.core.lesson_status"]);
    if (!status || status === "not attempted") {
      call("LMSSetValue", ["cmi.core.lesson_status", "incomplete"]);
      call("LMSCommit", [""]);
    }
    return true;
  }

  function attempt() {
    if (initialize()) {
      return;
    }
    attempts++;
    if (attempts < cfg.maxAttempts) {
      setTimeout(attempt, cfg.retryIntervalMs);
    }
  }

  function complete() {
    if (state !== INITIALIZED) {
      return false;
    }
    state = FINISHED;
    call("LMSSetValue", ["cmi.core.lesson_status", "completed"]);
    call("LMSCommit", [""]);
    call("LMSFinish", [""]);
    return true;
  }

  function autoComplete() {
    try {
      if (window[cfg.autoCompleteFlag] === true) {
        complete();
      }
    } catch (e) {}
  }

  window.ScormRuntime = {
    complete: complete,
    state: function () {
      return ["uninitialized", "initialized", "finished"][state];
    }
  };
  window.scormComplete = complete;

  if (document.readyState === "complete") {
    attempt();
  } else {
    window.addEventListener("load", attempt);
  }
  window.addEventListener("beforeunload", autoComplete);
  window.addEventListener("pagehide", autoComplete);
})"#;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScriptConfig<'a> {
    max_parent_hops: u32,
    retry_interval_ms: u32,
    max_attempts: u32,
    auto_complete_flag: &'a str,
}

/// Render the complete `<script>` block for the given options
pub fn runtime_script(options: &RuntimeOptions) -> String {
    let config = ScriptConfig {
        max_parent_hops: options.max_parent_hops,
        retry_interval_ms: options.retry_interval_ms,
        max_attempts: options.max_attempts,
        auto_complete_flag: &options.auto_complete_flag,
    };
    // Serializing plain integers and a validated identifier cannot fail
    let config_json = serde_json::to_string(&config).unwrap_or_else(|_| "{}".to_string());

    format!(
        "\n<script type=\"text/javascript\" {}>\ntry {{\n{}({});\n}} catch (e) {{}}\n</script>\n",
        RUNTIME_MARKER, RUNTIME_JS, config_json
    )
}

/// Inject the runtime with default options
pub fn inject(html: &str) -> String {
    inject_with(html, &RuntimeOptions::default())
}

/// Insert the runtime immediately before the first `</body>`, or append it
/// when the document has none
pub fn inject_with(html: &str, options: &RuntimeOptions) -> String {
    let script = runtime_script(options);
    let mut out = String::with_capacity(html.len() + script.len());

    match html.find(BODY_CLOSE) {
        Some(idx) => {
            out.push_str(&html[..idx]);
            out.push_str(&script);
            out.push_str(&html[idx..]);
        }
        None => {
            out.push_str(html);
            out.push_str(&script);
        }
    }

    out
}
