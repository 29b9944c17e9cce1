//! Best-effort rendering of values for failure messages.
//!
//! - Numbers render as decimal text, booleans as `true`/`false`
//! - Text renders double-quoted (characters single-quoted), without escaping
//! - Sequences render as `{e1,e2,...}`, each element rendered recursively
//! - Enums deriving `TestValue` render as `(enum)N`
//! - Anything else can fall back to [`opaque`], a `<type::name>` placeholder

use std::any::type_name;
use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

/// Converts a value into the text shown in a failure message.
pub trait Stringify {
    fn stringify(&self) -> String;
}

macro_rules! stringify_via_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Stringify for $ty {
                fn stringify(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

stringify_via_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool,
);

impl Stringify for char {
    fn stringify(&self) -> String {
        format!("'{self}'")
    }
}

impl Stringify for str {
    fn stringify(&self) -> String {
        format!("\"{self}\"")
    }
}

impl Stringify for String {
    fn stringify(&self) -> String {
        self.as_str().stringify()
    }
}

impl Stringify for Cow<'_, str> {
    fn stringify(&self) -> String {
        self.as_ref().stringify()
    }
}

impl<T: Stringify> Stringify for [T] {
    fn stringify(&self) -> String {
        sequence(self)
    }
}

impl<T: Stringify, const N: usize> Stringify for [T; N] {
    fn stringify(&self) -> String {
        sequence(self)
    }
}

impl<T: Stringify> Stringify for Vec<T> {
    fn stringify(&self) -> String {
        sequence(self)
    }
}

macro_rules! stringify_via_deref {
    ($($ptr:ty),* $(,)?) => {
        $(
            impl<T: Stringify + ?Sized> Stringify for $ptr {
                fn stringify(&self) -> String {
                    (**self).stringify()
                }
            }
        )*
    };
}

stringify_via_deref!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

/// Render `items` as `{e1,e2,...}`.
pub fn sequence<'a, T: Stringify + 'a>(items: impl IntoIterator<Item = &'a T>) -> String {
    let mut out = String::from("{");
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&item.stringify());
    }
    out.push('}');
    out
}

/// Placeholder for values with no meaningful rendering: `<` + type name + `>`.
///
/// The type name comes from [`std::any::type_name`] and is not guaranteed to be stable across compiler versions.
pub fn opaque<T: ?Sized>() -> String {
    format!("<{}>", type_name::<T>())
}
