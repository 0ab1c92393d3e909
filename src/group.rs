//! Rule-group validation: collect every failing check, not just the first
//!
//! A [`CheckGroup`] accumulates deferred validation rules, each optionally
//! bound to one or more field-path labels, and evaluates *all* of them in
//! registration order. Every failing rule contributes one [`Failure`] to the
//! result; a later rule always runs even when an earlier one failed.
//!
//! # Examples
//!
//! ```rust,ignore
//! use jsonvet::{CheckGroup, Failures, Validate};
//!
//! struct Transfer {
//!     amount: f64,
//!     balance: f64,
//! }
//!
//! impl Validate for Transfer {
//!     fn validate(&self) -> Result<(), Failures> {
//!         let mut checks = CheckGroup::new();
//!
//!         checks.field("amount").check(|| {
//!             if self.amount <= 0.0 {
//!                 return Err("amount should be greater than 0");
//!             }
//!             Ok(())
//!         });
//!
//!         checks.check(|| {
//!             if self.amount > self.balance {
//!                 return Err("insufficient balance");
//!             }
//!             Ok(())
//!         });
//!
//!         checks.validate()
//!     }
//! }
//! ```

use std::fmt;

use crate::error::{BoxError, Failure, Failures};

// ============================================================================
// VALIDATE CAPABILITY
// ============================================================================

/// The validation capability a schema type may expose.
///
/// Decode entry points that run domain validation after a successful
/// structural decode require this bound; types without the capability use
/// the structural-only entry points instead.
pub trait Validate {
    /// Runs the schema's validation rules.
    ///
    /// Returns `Ok(())` when nothing failed, or every failure at once.
    fn validate(&self) -> Result<(), Failures>;
}

/// Runs a value's [`Validate`] capability.
///
/// Convenience free function for call sites that do not hold a decoder.
pub fn validate<T: Validate + ?Sized>(value: &T) -> Result<(), Failures> {
    value.validate()
}

// ============================================================================
// CHECK GROUP
// ============================================================================

type Rule<'a> = Box<dyn FnOnce() -> Result<(), BoxError> + 'a>;

struct Check<'a> {
    fields: Vec<String>,
    rule: Rule<'a>,
}

/// An ordered group of deferred validation rules.
///
/// Rules are registered with [`check`](CheckGroup::check) (no field binding)
/// or through [`field`](CheckGroup::field) / [`fieldf`](CheckGroup::fieldf) /
/// [`fields`](CheckGroup::fields) (labelled). [`validate`](CheckGroup::validate)
/// consumes the group, runs every rule, and reports all failures in
/// registration order.
///
/// The lifetime parameter lets rules borrow from the value being validated.
/// A group is built and evaluated on one thread; the returned [`Failures`]
/// is freely shareable afterwards.
#[derive(Default)]
pub struct CheckGroup<'a> {
    checks: Vec<Check<'a>>,
}

impl<'a> CheckGroup<'a> {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Registers a rule with no field binding.
    pub fn check<F, E>(&mut self, rule: F)
    where
        F: FnOnce() -> Result<(), E> + 'a,
        E: Into<BoxError>,
    {
        self.push(Vec::new(), rule);
    }

    /// Binds the next rule to a single field-path label.
    ///
    /// The label is an opaque string such as `"payment.mode"`; it is not
    /// parsed or validated as a path expression.
    pub fn field(&mut self, name: impl Into<String>) -> FieldChain<'_, 'a> {
        self.fields([name.into()])
    }

    /// Binds the next rule to a formatted field-path label.
    ///
    /// Convenience for indexed paths:
    ///
    /// ```rust,ignore
    /// checks.fieldf(format_args!("payments[{idx}].amount")).check(|| { ... });
    /// ```
    pub fn fieldf(&mut self, label: fmt::Arguments<'_>) -> FieldChain<'_, 'a> {
        self.fields([label.to_string()])
    }

    /// Binds the next rule to several field-path labels at once.
    pub fn fields<I, S>(&mut self, names: I) -> FieldChain<'_, 'a>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = names
            .into_iter()
            .map(Into::into)
            .filter(|name| !name.is_empty())
            .collect();
        FieldChain {
            group: self,
            fields,
        }
    }

    /// Runs every registered rule, in registration order, with no
    /// short-circuit: a rule's failure never prevents a later rule from
    /// running.
    ///
    /// Returns `Ok(())` when no rule failed, otherwise a [`Failures`]
    /// holding one entry per failing rule, in registration order. The group
    /// and its rules are consumed.
    pub fn validate(self) -> Result<(), Failures> {
        let mut errors = Vec::with_capacity(self.checks.len());
        for check in self.checks {
            if let Err(error) = (check.rule)() {
                errors.push(Failure::new(check.fields, error));
            }
        }
        match Failures::from_vec(errors) {
            Some(failures) => Err(failures),
            None => Ok(()),
        }
    }

    fn push<F, E>(&mut self, fields: Vec<String>, rule: F)
    where
        F: FnOnce() -> Result<(), E> + 'a,
        E: Into<BoxError>,
    {
        self.checks.push(Check {
            fields,
            rule: Box::new(move || rule().map_err(Into::into)),
        });
    }
}

impl fmt::Debug for CheckGroup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckGroup")
            .field("checks", &self.checks.len())
            .finish()
    }
}

// ============================================================================
// FIELD CHAIN
// ============================================================================

/// Transient builder binding field labels to the next rule.
///
/// Produced by [`CheckGroup::field`] and friends; spent by its
/// [`check`](FieldChain::check) call. Consuming `self` makes reuse a
/// compile error.
#[must_use = "a field chain registers nothing until `check` is called"]
pub struct FieldChain<'g, 'a> {
    group: &'g mut CheckGroup<'a>,
    fields: Vec<String>,
}

impl<'a> FieldChain<'_, 'a> {
    /// Registers a rule bound to this chain's field labels.
    pub fn check<F, E>(self, rule: F)
    where
        F: FnOnce() -> Result<(), E> + 'a,
        E: Into<BoxError>,
    {
        self.group.push(self.fields, rule);
    }
}

impl fmt::Debug for FieldChain<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldChain")
            .field("fields", &self.fields)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
