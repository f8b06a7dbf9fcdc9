//! The host state that condition guards are evaluated against.

use crate::form::FormRef;

/// Read-only view of the host's loaded plugins and live forms.
///
/// Guards in configuration files (`IsPluginExists`, `IsFormExists`) are
/// answered through this trait. Implementations must not change state
/// while a configuration pass is reading them.
pub trait HostEnvironment {
    /// Returns true if the named plugin is loaded and active.
    fn is_plugin_active(&self, plugin: &str) -> bool;

    /// Returns true if the reference resolves to a live form.
    fn is_form_live(&self, form: &FormRef) -> bool;
}

impl<E: HostEnvironment + ?Sized> HostEnvironment for &E {
    fn is_plugin_active(&self, plugin: &str) -> bool {
        (**self).is_plugin_active(plugin)
    }

    fn is_form_live(&self, form: &FormRef) -> bool {
        (**self).is_form_live(form)
    }
}
