//! Bootstrap Types
//!
//! The built-in types every [`TypeLoader`] can see, defined by the bootstrap
//! loader:
//! - Lang: `Object`, `String`, the boxed primitives, `Comparable`,
//!   `CharSequence`, `Runnable`, `Serializable`
//! - Exceptions: the `Throwable` hierarchy the object model raises
//! - Collections: `Collection`, `List`, `ArrayList`
//!
//! Design notes:
//! - Types are built once, on first use, and never change afterwards
//! - Bootstrap classes name their superclass explicitly; the implicit
//!   `java.lang.Object` default would re-enter initialization

use once_cell::sync::Lazy;

use crate::throwable::Throwable;
use crate::types::{TypeLoader, TypeRef};
use crate::values::Value;

mod collections;
mod exceptions;
mod lang;


/// Qualified names of the bootstrap types.
pub mod names {
    pub const OBJECT: &str = "java.lang.Object";
    pub const STRING: &str = "java.lang.String";
    pub const COMPARABLE: &str = "java.lang.Comparable";
    pub const CHAR_SEQUENCE: &str = "java.lang.CharSequence";
    pub const RUNNABLE: &str = "java.lang.Runnable";
    pub const SERIALIZABLE: &str = "java.io.Serializable";

    pub const NUMBER: &str = "java.lang.Number";
    pub const BOOLEAN: &str = "java.lang.Boolean";
    pub const BYTE: &str = "java.lang.Byte";
    pub const SHORT: &str = "java.lang.Short";
    pub const CHARACTER: &str = "java.lang.Character";
    pub const INTEGER: &str = "java.lang.Integer";
    pub const LONG: &str = "java.lang.Long";
    pub const FLOAT: &str = "java.lang.Float";
    pub const DOUBLE: &str = "java.lang.Double";

    pub const COLLECTION: &str = "java.util.Collection";
    pub const LIST: &str = "java.util.List";
    pub const ARRAY_LIST: &str = "java.util.ArrayList";

    pub const THROWABLE: &str = "java.lang.Throwable";
    pub const EXCEPTION: &str = "java.lang.Exception";
    pub const RUNTIME_EXCEPTION: &str = "java.lang.RuntimeException";
    pub const ERROR: &str = "java.lang.Error";
    pub const IO_EXCEPTION: &str = "java.io.IOException";
    pub const REFLECTIVE_OPERATION_EXCEPTION: &str = "java.lang.ReflectiveOperationException";
    pub const ILLEGAL_ARGUMENT_EXCEPTION: &str = "java.lang.IllegalArgumentException";
    pub const ILLEGAL_STATE_EXCEPTION: &str = "java.lang.IllegalStateException";
    pub const NULL_POINTER_EXCEPTION: &str = "java.lang.NullPointerException";
    pub const CLASS_CAST_EXCEPTION: &str = "java.lang.ClassCastException";
    pub const UNSUPPORTED_OPERATION_EXCEPTION: &str = "java.lang.UnsupportedOperationException";
    pub const INDEX_OUT_OF_BOUNDS_EXCEPTION: &str = "java.lang.IndexOutOfBoundsException";
    pub const ABSTRACT_METHOD_ERROR: &str = "java.lang.AbstractMethodError";
    pub const NO_SUCH_METHOD_ERROR: &str = "java.lang.NoSuchMethodError";
    pub const INSTANTIATION_EXCEPTION: &str = "java.lang.InstantiationException";
    pub const INVOCATION_TARGET_EXCEPTION: &str = "java.lang.reflect.InvocationTargetException";
    pub const UNDECLARED_THROWABLE_EXCEPTION: &str =
        "java.lang.reflect.UndeclaredThrowableException";
}

/// The `index`th argument of a method body.
pub(crate) fn arg(args: &[Value], index: usize) -> Result<&Value, Throwable> {
    args.get(index)
        .ok_or_else(|| Throwable::illegal_argument(format!("missing argument {}", index)))
}

static BOOTSTRAP: Lazy<Bootstrap> = Lazy::new(Bootstrap::new);

/// The bootstrap types.
pub fn bootstrap() -> &'static Bootstrap {
    &BOOTSTRAP
}

macro_rules! bootstrap_types {
    ($($field:ident),* $(,)?) => {
        /// Handles to the bootstrap types plus the loader that defines them.
        pub struct Bootstrap {
            loader: TypeLoader,
            $($field: TypeRef,)*
        }

        impl Bootstrap {
            $(
                pub fn $field(&self) -> &TypeRef {
                    &self.$field
                }
            )*
        }

        struct Types {
            $($field: TypeRef,)*
        }

        impl Types {
            fn into_bootstrap(self) -> Bootstrap {
                let all = [$(self.$field.clone(),)*];
                Bootstrap {
                    loader: TypeLoader::from_types("bootstrap", all),
                    $($field: self.$field,)*
                }
            }
        }
    };
}

bootstrap_types! {
    object,
    string,
    comparable,
    char_sequence,
    runnable,
    serializable,
    number,
    boolean,
    byte,
    short,
    character,
    integer,
    long,
    float,
    double,
    collection,
    list,
    array_list,
    throwable,
    exception,
    runtime_exception,
    error,
    io_exception,
    reflective_operation_exception,
    illegal_argument_exception,
    illegal_state_exception,
    null_pointer_exception,
    class_cast_exception,
    unsupported_operation_exception,
    index_out_of_bounds_exception,
    abstract_method_error,
    no_such_method_error,
    instantiation_exception,
    invocation_target_exception,
    undeclared_throwable_exception,
}

impl Bootstrap {
    fn new() -> Self {
        let object = lang::object();
        let serializable = lang::serializable();
        let comparable = lang::comparable();
        let char_sequence = lang::char_sequence();
        let runnable = lang::runnable();
        let string = lang::string(&object, &serializable, &comparable, &char_sequence);
        let number = lang::number(&object, &serializable);

        let boxed = lang::Boxed {
            object: &object,
            number: &number,
            serializable: &serializable,
            comparable: &comparable,
        };

        let collection = collections::collection();
        let list = collections::list(&collection);
        let array_list = collections::array_list(&object, &list, &serializable);

        let throwable = exceptions::throwable(&object, &serializable);
        let exception = exceptions::subclass(names::EXCEPTION, &throwable);
        let runtime_exception = exceptions::subclass(names::RUNTIME_EXCEPTION, &exception);
        let error = exceptions::subclass(names::ERROR, &throwable);
        let reflective_operation_exception =
            exceptions::subclass(names::REFLECTIVE_OPERATION_EXCEPTION, &exception);

        Types {
            boolean: boxed.boolean(),
            byte: boxed.byte(),
            short: boxed.short(),
            character: boxed.character(),
            integer: boxed.integer(),
            long: boxed.long(),
            float: boxed.float(),
            double: boxed.double(),
            io_exception: exceptions::subclass(names::IO_EXCEPTION, &exception),
            illegal_argument_exception: exceptions::subclass(
                names::ILLEGAL_ARGUMENT_EXCEPTION,
                &runtime_exception,
            ),
            illegal_state_exception: exceptions::subclass(
                names::ILLEGAL_STATE_EXCEPTION,
                &runtime_exception,
            ),
            null_pointer_exception: exceptions::subclass(
                names::NULL_POINTER_EXCEPTION,
                &runtime_exception,
            ),
            class_cast_exception: exceptions::subclass(
                names::CLASS_CAST_EXCEPTION,
                &runtime_exception,
            ),
            unsupported_operation_exception: exceptions::subclass(
                names::UNSUPPORTED_OPERATION_EXCEPTION,
                &runtime_exception,
            ),
            index_out_of_bounds_exception: exceptions::subclass(
                names::INDEX_OUT_OF_BOUNDS_EXCEPTION,
                &runtime_exception,
            ),
            undeclared_throwable_exception: exceptions::subclass(
                names::UNDECLARED_THROWABLE_EXCEPTION,
                &runtime_exception,
            ),
            abstract_method_error: exceptions::subclass(names::ABSTRACT_METHOD_ERROR, &error),
            no_such_method_error: exceptions::subclass(names::NO_SUCH_METHOD_ERROR, &error),
            instantiation_exception: exceptions::subclass(
                names::INSTANTIATION_EXCEPTION,
                &reflective_operation_exception,
            ),
            invocation_target_exception: exceptions::subclass(
                names::INVOCATION_TARGET_EXCEPTION,
                &reflective_operation_exception,
            ),
            object,
            string,
            comparable,
            char_sequence,
            runnable,
            serializable,
            number,
            collection,
            list,
            array_list,
            throwable,
            exception,
            runtime_exception,
            error,
            reflective_operation_exception,
        }
        .into_bootstrap()
    }

    pub fn loader(&self) -> &TypeLoader {
        &self.loader
    }
}
