use std::rc::Rc;

/// Hard navigation, the way the browser location bar does it.
pub trait Navigator {
    fn current_path(&self) -> String;
    fn navigate(&self, path: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default()
    }

    fn navigate(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.location().set_href(path) {
                log::warn!("navigation to {} failed: {:?}", path, err);
            }
        }
    }
}

/// Navigator used when no browser is present; it only remembers where it was
/// sent.
#[derive(Debug, Clone, Default)]
pub struct DetachedNavigator {
    history: Rc<std::cell::RefCell<Vec<String>>>,
}

impl DetachedNavigator {
    pub fn at(path: &str) -> Self {
        let nav = Self::default();
        nav.history.borrow_mut().push(path.to_string());
        nav
    }

    pub fn visited(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}

impl Navigator for DetachedNavigator {
    fn current_path(&self) -> String {
        self.history.borrow().last().cloned().unwrap_or_default()
    }

    fn navigate(&self, path: &str) {
        self.history.borrow_mut().push(path.to_string());
    }
}

#[cfg(target_arch = "wasm32")]
pub fn default_navigator() -> Rc<dyn Navigator> {
    Rc::new(BrowserNavigator)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn default_navigator() -> Rc<dyn Navigator> {
    Rc::new(DetachedNavigator::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_navigator_tracks_current_path() {
        let nav = DetachedNavigator::at("/dashboard");
        assert_eq!(nav.current_path(), "/dashboard");
        nav.navigate("/login");
        assert_eq!(nav.current_path(), "/login");
        assert_eq!(nav.visited(), vec!["/dashboard", "/login"]);
    }
}
