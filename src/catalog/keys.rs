use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Invokes `$callback!` with one `(Variant, "catalogName", snake_name)` tuple
/// per supported event, in catalog order.
macro_rules! with_event_keys {
    ($callback:ident) => {
        $callback! {
            (Copy, "copy", copy),
            (Cut, "cut", cut),
            (Paste, "paste", paste),
            (CompositionEnd, "compositionEnd", composition_end),
            (CompositionStart, "compositionStart", composition_start),
            (CompositionUpdate, "compositionUpdate", composition_update),
            (KeyDown, "keyDown", key_down),
            (KeyPress, "keyPress", key_press),
            (KeyUp, "keyUp", key_up),
            (Focus, "focus", focus),
            (Blur, "blur", blur),
            (FocusIn, "focusIn", focus_in),
            (FocusOut, "focusOut", focus_out),
            (Change, "change", change),
            (Input, "input", input),
            (Invalid, "invalid", invalid),
            (Submit, "submit", submit),
            (Reset, "reset", reset),
            (Click, "click", click),
            (ContextMenu, "contextMenu", context_menu),
            (DblClick, "dblClick", dbl_click),
            (Drag, "drag", drag),
            (DragEnd, "dragEnd", drag_end),
            (DragEnter, "dragEnter", drag_enter),
            (DragExit, "dragExit", drag_exit),
            (DragLeave, "dragLeave", drag_leave),
            (DragOver, "dragOver", drag_over),
            (DragStart, "dragStart", drag_start),
            (Drop, "drop", drop),
            (MouseDown, "mouseDown", mouse_down),
            (MouseEnter, "mouseEnter", mouse_enter),
            (MouseLeave, "mouseLeave", mouse_leave),
            (MouseMove, "mouseMove", mouse_move),
            (MouseOut, "mouseOut", mouse_out),
            (MouseOver, "mouseOver", mouse_over),
            (MouseUp, "mouseUp", mouse_up),
            (Select, "select", select),
            (TouchCancel, "touchCancel", touch_cancel),
            (TouchEnd, "touchEnd", touch_end),
            (TouchMove, "touchMove", touch_move),
            (TouchStart, "touchStart", touch_start),
            (Scroll, "scroll", scroll),
            (Wheel, "wheel", wheel),
            (Abort, "abort", abort),
            (CanPlay, "canPlay", can_play),
            (CanPlayThrough, "canPlayThrough", can_play_through),
            (DurationChange, "durationChange", duration_change),
            (Emptied, "emptied", emptied),
            (Encrypted, "encrypted", encrypted),
            (Ended, "ended", ended),
            (LoadedData, "loadedData", loaded_data),
            (LoadedMetadata, "loadedMetadata", loaded_metadata),
            (LoadStart, "loadStart", load_start),
            (Pause, "pause", pause),
            (Play, "play", play),
            (Playing, "playing", playing),
            (Progress, "progress", progress),
            (RateChange, "rateChange", rate_change),
            (Seeked, "seeked", seeked),
            (Seeking, "seeking", seeking),
            (Stalled, "stalled", stalled),
            (Suspend, "suspend", suspend),
            (TimeUpdate, "timeUpdate", time_update),
            (VolumeChange, "volumeChange", volume_change),
            (Waiting, "waiting", waiting),
            (Load, "load", load),
            (Error, "error", error),
            (AnimationStart, "animationStart", animation_start),
            (AnimationEnd, "animationEnd", animation_end),
            (AnimationIteration, "animationIteration", animation_iteration),
            (TransitionEnd, "transitionEnd", transition_end),
            (PointerOver, "pointerOver", pointer_over),
            (PointerEnter, "pointerEnter", pointer_enter),
            (PointerDown, "pointerDown", pointer_down),
            (PointerMove, "pointerMove", pointer_move),
            (PointerUp, "pointerUp", pointer_up),
            (PointerCancel, "pointerCancel", pointer_cancel),
            (PointerOut, "pointerOut", pointer_out),
            (PointerLeave, "pointerLeave", pointer_leave),
            (GotPointerCapture, "gotPointerCapture", got_pointer_capture),
            (LostPointerCapture, "lostPointerCapture", lost_pointer_capture),
        }
    };
}

/// Same shape as [`with_event_keys`], for the convenience aliases.
macro_rules! with_alias_keys {
    ($callback:ident) => {
        $callback! {
            (DoubleClick, "doubleClick", double_click),
        }
    };
}

pub(crate) use with_alias_keys;
pub(crate) use with_event_keys;

macro_rules! define_keys {
    ($(#[$meta:meta])* $name:ident, $kind:literal; $(($variant:ident, $label:literal, $snake:ident)),* $(,)?) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// Catalog name, e.g. `dblClick`.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)*
                }
            }

            pub(crate) fn index(self) -> usize {
                self as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = UnknownKey;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                match raw {
                    $($label => Ok($name::$variant),)*
                    other => Err(UnknownKey {
                        kind: $kind,
                        name: other.to_string(),
                    }),
                }
            }
        }
    };
}

macro_rules! define_event_key {
    ($($entry:tt),* $(,)?) => {
        define_keys! {
            /// One supported event type.
            EventKey, "event"; $($entry),*
        }
    };
}

macro_rules! define_alias_key {
    ($($entry:tt),* $(,)?) => {
        define_keys! {
            /// A convenience name that resolves to an [`EventKey`] through the catalog.
            AliasKey, "alias"; $($entry),*
        }
    };
}

with_event_keys!(define_event_key);
with_alias_keys!(define_alias_key);

impl EventKey {
    /// The DOM event type: the catalog name in lowercase.
    pub fn event_type(self) -> String {
        self.name().to_ascii_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} name \"{name}\"")]
pub struct UnknownKey {
    pub kind: &'static str,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for key in EventKey::ALL {
            assert_eq!(key.name().parse::<EventKey>().unwrap(), *key);
        }
        assert_eq!("doubleClick".parse::<AliasKey>().unwrap(), AliasKey::DoubleClick);
    }

    #[test]
    fn event_type_is_lowercase_name() {
        assert_eq!(EventKey::DblClick.event_type(), "dblclick");
        assert_eq!(EventKey::GotPointerCapture.event_type(), "gotpointercapture");
    }

    #[test]
    fn indices_follow_declaration_order() {
        for (position, key) in EventKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), position);
        }
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "Click".parse::<EventKey>().unwrap_err();
        assert_eq!(err.to_string(), "unknown event name \"Click\"");
    }
}
