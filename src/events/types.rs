//! Handler types and the notifications raised when handlers come and go

use std::fmt;

/// Logical category of an event handler.
///
/// Several handler types can share a native event name (an editor `change`
/// and a document `change`); they are still distinct types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerType {
    // Editor
    Change,
    Changes,
    BeforeChange,
    CursorActivity,
    KeyHandled,
    InputRead,
    ElectricInput,
    BeforeSelectionChange,
    ViewportChange,
    SwapDoc,
    GutterClick,
    Focus,
    Blur,
    Scroll,
    Refresh,
    OptionChange,
    ScrollCursorIntoView,
    Update,
    RenderLine,
    Cut,
    DragEnter,
    DragOver,

    // Document
    DocumentChange,
    DocumentBeforeChange,
    DocumentCursorActivity,
    DocumentBeforeSelectionChange,

    // Line handle
    LineHandleChange,
    LineHandleDelete,

    // Line widget
    LineWidgetRedraw,

    // Text marker
    TextMarkerBeforeCursorEnter,
    TextMarkerClear,
    TextMarkerHide,
    TextMarkerUnhide,
}

impl HandlerType {
    /// Event name used on the native emitter
    pub const fn native_name(self) -> &'static str {
        match self {
            HandlerType::Change | HandlerType::DocumentChange | HandlerType::LineHandleChange => {
                "change"
            }
            HandlerType::Changes => "changes",
            HandlerType::BeforeChange | HandlerType::DocumentBeforeChange => "beforeChange",
            HandlerType::CursorActivity | HandlerType::DocumentCursorActivity => "cursorActivity",
            HandlerType::KeyHandled => "keyHandled",
            HandlerType::InputRead => "inputRead",
            HandlerType::ElectricInput => "electricInput",
            HandlerType::BeforeSelectionChange | HandlerType::DocumentBeforeSelectionChange => {
                "beforeSelectionChange"
            }
            HandlerType::ViewportChange => "viewportChange",
            HandlerType::SwapDoc => "swapDoc",
            HandlerType::GutterClick => "gutterClick",
            HandlerType::Focus => "focus",
            HandlerType::Blur => "blur",
            HandlerType::Scroll => "scroll",
            HandlerType::Refresh => "refresh",
            HandlerType::OptionChange => "optionChange",
            HandlerType::ScrollCursorIntoView => "scrollCursorIntoView",
            HandlerType::Update => "update",
            HandlerType::RenderLine => "renderLine",
            HandlerType::Cut => "cut",
            HandlerType::DragEnter => "dragenter",
            HandlerType::DragOver => "dragover",
            HandlerType::LineHandleDelete => "delete",
            HandlerType::LineWidgetRedraw => "redraw",
            HandlerType::TextMarkerBeforeCursorEnter => "beforeCursorEnter",
            HandlerType::TextMarkerClear => "clear",
            HandlerType::TextMarkerHide => "hide",
            HandlerType::TextMarkerUnhide => "unhide",
        }
    }
}

impl fmt::Display for HandlerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Raised after a handler has been added
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddHandlerEvent {
    handler_type: HandlerType,
}

impl AddHandlerEvent {
    pub const fn new(handler_type: HandlerType) -> Self {
        Self { handler_type }
    }

    pub const fn handler_type(&self) -> HandlerType {
        self.handler_type
    }

    /// Check if this notification concerns handlers of `handler_type`
    pub fn is_recognized(&self, handler_type: HandlerType) -> bool {
        self.handler_type == handler_type
    }
}

/// Raised after a handler has been removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveHandlerEvent {
    handler_type: HandlerType,
}

impl RemoveHandlerEvent {
    pub const fn new(handler_type: HandlerType) -> Self {
        Self { handler_type }
    }

    pub const fn handler_type(&self) -> HandlerType {
        self.handler_type
    }

    pub fn is_recognized(&self, handler_type: HandlerType) -> bool {
        self.handler_type == handler_type
    }
}
