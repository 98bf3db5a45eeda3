//! Push platform adapters
//!
//! The real permission prompt and push-handle minting live in the host
//! platform's notification SDK; the registrar only sees the
//! [`PushPlatform`] seam. This module provides the adapter for hosts that
//! have already been granted permission and hold a handle, such as the
//! `register_device` CLI, where the handle arrives as an argument.

use notifly_common::services::{BoxFuture, BoxedError, PermissionStatus, PushPlatform};

/// A platform whose permission state and push handle are fixed up front.
pub struct StaticPushPlatform {
    permission: PermissionStatus,
    push_handle: String,
}

impl StaticPushPlatform {
    /// Platform with permission already granted and `push_handle` issued.
    pub fn granted(push_handle: impl Into<String>) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            push_handle: push_handle.into(),
        }
    }

    /// Platform where the user has declined notifications.
    pub fn denied() -> Self {
        Self {
            permission: PermissionStatus::Denied,
            push_handle: String::new(),
        }
    }
}

impl PushPlatform for StaticPushPlatform {
    type Error = BoxedError;

    fn request_permission(&self) -> BoxFuture<'_, PermissionStatus, Self::Error> {
        let status = self.permission;
        Box::pin(async move { Ok(status) })
    }

    fn acquire_push_handle(&self, _project_id: &str) -> BoxFuture<'_, String, Self::Error> {
        let handle = self.push_handle.clone();
        Box::pin(async move { Ok(handle) })
    }
}
