/// Installs `visibilitychange`/`blur` listeners that post `"visibility"` or
/// `"blur"` back to Rust. Re-running replaces the previous listeners.
pub(super) fn focus_watcher_script() -> &'static str {
    r#"(function() {
            const state = window.__cquizyFocusWatcher || (window.__cquizyFocusWatcher = {});
            if (state.onVisibility) {
                document.removeEventListener("visibilitychange", state.onVisibility);
            }
            if (state.onBlur) {
                window.removeEventListener("blur", state.onBlur);
            }
            state.onVisibility = () => {
                if (document.hidden) dioxus.send("visibility");
            };
            state.onBlur = () => dioxus.send("blur");
            document.addEventListener("visibilitychange", state.onVisibility);
            window.addEventListener("blur", state.onBlur);
        })();"#
}

/// Removes the listeners installed by [`focus_watcher_script`].
pub(super) fn focus_watcher_teardown_script() -> &'static str {
    r#"(function() {
            const state = window.__cquizyFocusWatcher;
            if (!state) return;
            if (state.onVisibility) {
                document.removeEventListener("visibilitychange", state.onVisibility);
            }
            if (state.onBlur) {
                window.removeEventListener("blur", state.onBlur);
            }
            window.__cquizyFocusWatcher = {};
        })();"#
}
