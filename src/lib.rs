pub mod common;
pub mod error;
pub mod lifecycle;
pub mod navigation;

use crate::error::NavError;
use crate::lifecycle::LifecycleNode;
use crate::navigation::NavigationStack;

/// Core functionality for the Talos robot
pub struct TalosCore {
    components: Vec<Box<dyn LifecycleNode>>,
}

impl TalosCore {
    /// Create a new instance of TalosCore
    pub fn new() -> Self {
        TalosCore {
            components: Vec::new(),
        }
    }

    /// Register a component with the core
    pub fn register<T: LifecycleNode + 'static>(&mut self, component: T) {
        self.components.push(Box::new(component));
    }

    /// Initialize all registered components
    ///
    /// Configuration errors abort initialization before any component is
    /// activated.
    pub fn init(&mut self) -> Result<(), NavError> {
        for component in &mut self.components {
            component.on_configure()?;
            component.on_activate()?;
        }
        Ok(())
    }

    /// Shutdown all registered components
    pub fn shutdown(&mut self) -> Result<(), NavError> {
        for component in &mut self.components {
            component.on_deactivate()?;
            component.on_cleanup()?;
        }
        Ok(())
    }

    /// Get a mutable reference to the navigation stack, if registered
    pub fn navigation_stack_mut(&mut self) -> Option<&mut NavigationStack> {
        self.components
            .iter_mut()
            .find_map(|component| component.as_any_mut().downcast_mut::<NavigationStack>())
    }
}

impl Default for TalosCore {
    fn default() -> Self {
        Self::new()
    }
}
