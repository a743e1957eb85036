use std::fmt;

/// Dotted path to a request field, as reported in violations
/// (`messages[0].destinations[1].to`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    /// The empty path, pointing at the request body itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of a named child field.
    pub fn field(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_owned())
        } else {
            Self(format!("{}.{name}", self.0))
        }
    }

    /// Path of the `index`-th element of a list field.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single broken constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub rule: &'static str,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.field, self.message, self.rule)
    }
}

/// Request body failed pre-flight validation. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Single-violation error, used by value constructors.
    pub fn single(field: impl Into<String>, rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation {
                field: field.into(),
                rule,
                message: message.into(),
            }],
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether any violation was reported for `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, violation) in self.violations.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collector for violations with one helper per rule.
#[derive(Debug, Default)]
pub struct Violations {
    items: Vec<Violation>,
}

impl Violations {
    pub fn push(&mut self, path: &FieldPath, rule: &'static str, message: impl Into<String>) {
        self.items.push(Violation {
            field: path.as_str().to_owned(),
            rule,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.items.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations: self.items })
        }
    }

    /// `value` must be present.
    pub fn required<T: ?Sized>(&mut self, path: &FieldPath, value: Option<&T>) -> bool {
        if value.is_none() {
            self.push(path, "required", "must not be null");
            return false;
        }
        true
    }

    /// `value` must contain a non-whitespace character.
    pub fn not_blank(&mut self, path: &FieldPath, value: &str) {
        if value.trim().is_empty() {
            self.push(path, "not_blank", "must not be blank");
        }
    }

    /// Present and not blank.
    pub fn required_text(&mut self, path: &FieldPath, value: Option<&str>) {
        if self.required(path, value) {
            self.not_blank(path, value.unwrap_or_default());
        }
    }

    /// Character count must be within `min..=max`.
    pub fn length(&mut self, path: &FieldPath, value: &str, min: usize, max: usize) {
        let len = value.chars().count();
        if len < min || len > max {
            self.push(
                path,
                "length",
                format!("size must be between {min} and {max}"),
            );
        }
    }

    /// Like [`Violations::length`], skipped when absent.
    pub fn optional_length(&mut self, path: &FieldPath, value: Option<&str>, min: usize, max: usize) {
        if let Some(value) = value {
            self.length(path, value, min, max);
        }
    }

    /// `value` must be one of `allowed`.
    pub fn one_of(&mut self, path: &FieldPath, value: &str, allowed: &[&str]) {
        if !allowed.contains(&value) {
            self.push(
                path,
                "one_of",
                format!("must be one of [{}]", allowed.join(", ")),
            );
        }
    }

    /// `value` must be an absolute `http`/`https` URL.
    pub fn url(&mut self, path: &FieldPath, value: &str) {
        let valid = url::Url::parse(value)
            .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
            .unwrap_or(false);
        if !valid {
            self.push(path, "url", "must be a valid URL");
        }
    }

    /// Like [`Violations::url`], skipped when absent.
    pub fn optional_url(&mut self, path: &FieldPath, value: Option<&str>) {
        if let Some(value) = value {
            self.url(path, value);
        }
    }

    /// Numeric value must be within `min..=max`.
    pub fn range<N>(&mut self, path: &FieldPath, value: N, min: N, max: N)
    where
        N: PartialOrd + fmt::Display + Copy,
    {
        if value < min || value > max {
            self.push(
                path,
                "range",
                format!("must be between {min} and {max}"),
            );
        }
    }

    /// List must have at least one element.
    pub fn not_empty<T>(&mut self, path: &FieldPath, items: &[T]) {
        if items.is_empty() {
            self.push(path, "not_empty", "must not be empty");
        }
    }

    /// List must not exceed `max` elements.
    pub fn max_items<T>(&mut self, path: &FieldPath, items: &[T], max: usize) {
        if items.len() > max {
            self.push(
                path,
                "max_items",
                format!("size must be between 0 and {max}"),
            );
        }
    }

    /// `value` must be a media type such as `image/png` or `text/plain; charset=utf-8`.
    pub fn media_type(&mut self, path: &FieldPath, value: &str) {
        if !is_media_type(value) {
            self.push(path, "media_type", "must be a valid media type");
        }
    }

    /// Like [`Violations::media_type`], skipped when absent.
    pub fn optional_media_type(&mut self, path: &FieldPath, value: Option<&str>) {
        if let Some(value) = value {
            self.media_type(path, value);
        }
    }

    /// `value` must consist of ASCII digits only.
    pub fn digits(&mut self, path: &FieldPath, value: &str) {
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            self.push(path, "digits", "must contain digits only");
        }
    }
}

fn is_token(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$&-^_.+%*'`|~".contains(&b))
}

/// `type/subtype` followed by optional `; name=value` parameters.
pub(crate) fn is_media_type(value: &str) -> bool {
    let mut sections = value.split(';');
    let essence = sections.next().unwrap_or_default().trim();
    let valid_essence = essence
        .split_once('/')
        .is_some_and(|(kind, subtype)| is_token(kind) && is_token(subtype));
    valid_essence
        && sections.all(|param| {
            param.split_once('=').is_some_and(|(name, value)| {
                let value = value.trim();
                let quoted = value.len() >= 2 && value.starts_with('"') && value.ends_with('"');
                is_token(name.trim()) && (quoted || is_token(value))
            })
        })
}

/// Constraints attached to a request type, evaluated before transmission.
pub trait Validate {
    /// Report every broken constraint below `path`.
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations);

    /// Validate from the root of the body.
    fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::default();
        self.validate_at(&FieldPath::root(), &mut violations);
        violations.into_result()
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        if let Some(value) = self {
            value.validate_at(path, violations);
        }
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        for (idx, item) in self.iter().enumerate() {
            item.validate_at(&path.index(idx), violations);
        }
    }
}

impl<T: Validate + ?Sized> Validate for &T {
    fn validate_at(&self, path: &FieldPath, violations: &mut Violations) {
        (**self).validate_at(path, violations);
    }
}

/// Pluggable constraint engine used by the request pipeline.
///
/// The pipeline only needs `Ok` or a structured [`ValidationError`]; swapping the
/// engine never changes how requests are sent.
pub trait Validator: Send + Sync + fmt::Debug {
    fn check(&self, value: &dyn Validate) -> Result<(), ValidationError>;
}

/// Default engine: runs the rules each request type declares through [`Validate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleValidator;

impl Validator for RuleValidator {
    fn check(&self, value: &dyn Validate) -> Result<(), ValidationError> {
        value.validate()
    }
}

/// Engine that accepts every request, leaving validation to the server.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipValidation;

impl Validator for SkipValidation {
    fn check(&self, _value: &dyn Validate) -> Result<(), ValidationError> {
        Ok(())
    }
}
