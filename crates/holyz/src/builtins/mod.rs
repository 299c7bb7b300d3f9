//! The builtin function surface: the dotted `ZS.*` namespace and the bare
//! Holy-C names.
//!
//! Both tables resolve names case-insensitively; each group of builtins has
//! its own submodule.

mod adt;
mod convert;
mod math;
mod memory;
mod message;
mod system;

use strum::EnumString;

use crate::{error::RunResult, io::PrintWriter, run::Interp, value::Value};

/// Builtins addressed by dotted path under the `ZS.` namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub(crate) enum ZsFunction {
    #[strum(serialize = "ZS.Math.Sin")]
    MathSin,
    #[strum(serialize = "ZS.Math.Cos")]
    MathCos,
    #[strum(serialize = "ZS.Math.Tan")]
    MathTan,
    #[strum(serialize = "ZS.Math.Abs")]
    MathAbs,
    #[strum(serialize = "ZS.Math.Round")]
    MathRound,
    #[strum(serialize = "ZS.Math.Lerp")]
    MathLerp,
    #[strum(serialize = "ZS.System.Print")]
    SystemPrint,
    #[strum(serialize = "ZS.System.PrintLine")]
    SystemPrintLine,
    #[strum(serialize = "ZS.System.Command")]
    SystemCommand,
    #[strum(serialize = "ZS.System.Vec2")]
    SystemVec2,
}

impl ZsFunction {
    /// Calls this builtin with already-evaluated arguments.
    pub(crate) fn call(self, args: &[Value], print: &mut impl PrintWriter) -> RunResult<Value> {
        match self {
            Self::MathSin => Ok(math::sin(args)),
            Self::MathCos => Ok(math::cos(args)),
            Self::MathTan => Ok(math::tan(args)),
            Self::MathAbs => Ok(math::abs(args)),
            Self::MathRound => Ok(math::round(args)),
            Self::MathLerp => Ok(math::lerp(args)),
            Self::SystemPrint => system::print(args, print),
            Self::SystemPrintLine => system::print_line(args, print),
            Self::SystemCommand => Ok(system::command(args)),
            Self::SystemVec2 => Ok(system::vec2(args)),
        }
    }
}

/// Bare Holy-C builtin names: conversions, reflection, the simulated heap,
/// object messaging, and the Result/Option constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub(crate) enum HolyCFunction {
    ToInt,
    ToFloat,
    ToStr,
    ToBool,
    TypeOf,
    #[strum(serialize = "typecheck", serialize = "istype")]
    TypeCheck,
    Malloc,
    Free,
    #[strum(serialize = "addressof", serialize = "ptr")]
    AddressOf,
    #[strum(serialize = "deref", serialize = "dereference")]
    Deref,
    SetValue,
    Send,
    HasMethod,
    GetMethod,
    Ok,
    Err,
    IsOk,
    IsErr,
    Unwrap,
    Expect,
    UnwrapOr,
    Some,
    None,
    IsSome,
    IsNone,
}

impl HolyCFunction {
    /// Calls this builtin with already-evaluated arguments.
    pub(crate) fn call(self, interp: &mut Interp, args: &[Value], print: &mut impl PrintWriter) -> RunResult<Value> {
        match self {
            Self::ToInt => Ok(convert::to_int(args)),
            Self::ToFloat => Ok(convert::to_float(args)),
            Self::ToStr => Ok(convert::to_str(args)),
            Self::ToBool => Ok(convert::to_bool(args)),
            Self::TypeOf => Ok(convert::type_of(args)),
            Self::TypeCheck => Ok(convert::type_check(args)),
            Self::Malloc | Self::AddressOf => Ok(memory::malloc(interp, args)),
            Self::Free => Ok(memory::free(interp, args)),
            Self::Deref => Ok(memory::deref(interp, args)),
            Self::SetValue => Ok(memory::set_value(interp, args)),
            Self::Send => message::send(interp, args, print),
            Self::HasMethod => Ok(message::has_method(interp, args)),
            Self::GetMethod => Ok(message::get_method(interp, args)),
            Self::Ok => Ok(adt::ok(args)),
            Self::Err => Ok(adt::err(args)),
            Self::IsOk => Ok(adt::is_ok(args)),
            Self::IsErr => Ok(adt::is_err(args)),
            Self::Unwrap => Ok(adt::unwrap(args)),
            Self::Expect => Ok(adt::expect(args)),
            Self::UnwrapOr => Ok(adt::unwrap_or(args)),
            Self::Some => Ok(adt::some(args)),
            Self::None => Ok(adt::none(args)),
            Self::IsSome => Ok(adt::is_some(args)),
            Self::IsNone => Ok(adt::is_none(args)),
        }
    }
}
