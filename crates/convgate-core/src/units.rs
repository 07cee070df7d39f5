//! Scalar unit conversion over a registry of common units.
//!
//! A unit expression is a product of terms such as `kg/m**3` or `km/h`. Each
//! term is a registry unit, optionally carrying an SI or binary prefix and an
//! integer exponent. Every resolved unit maps linearly onto base units:
//! `base = (value + offset) * factor`. Only temperatures carry an offset and
//! they may not appear inside a compound expression.

use crate::error::{ConvertError, Result};
use crate::ConversionOutput;

/// Exponents over length, mass, time, temperature, current and information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimension([i8; 6]);

impl Dimension {
    pub const NONE: Self = Self([0; 6]);
    pub const LENGTH: Self = Self([1, 0, 0, 0, 0, 0]);
    pub const MASS: Self = Self([0, 1, 0, 0, 0, 0]);
    pub const TIME: Self = Self([0, 0, 1, 0, 0, 0]);
    pub const TEMPERATURE: Self = Self([0, 0, 0, 1, 0, 0]);
    pub const CURRENT: Self = Self([0, 0, 0, 0, 1, 0]);
    pub const INFORMATION: Self = Self([0, 0, 0, 0, 0, 1]);
    pub const AREA: Self = Self([2, 0, 0, 0, 0, 0]);
    pub const VOLUME: Self = Self([3, 0, 0, 0, 0, 0]);
    pub const SPEED: Self = Self([1, 0, -1, 0, 0, 0]);
    pub const FREQUENCY: Self = Self([0, 0, -1, 0, 0, 0]);
    pub const FORCE: Self = Self([1, 1, -2, 0, 0, 0]);
    pub const PRESSURE: Self = Self([-1, 1, -2, 0, 0, 0]);
    pub const ENERGY: Self = Self([2, 1, -2, 0, 0, 0]);
    pub const POWER: Self = Self([2, 1, -3, 0, 0, 0]);
    pub const CHARGE: Self = Self([0, 0, 1, 0, 1, 0]);
    pub const VOLTAGE: Self = Self([2, 1, -3, 0, -1, 0]);
    pub const RESISTANCE: Self = Self([2, 1, -3, 0, -2, 0]);
    pub const CAPACITANCE: Self = Self([-2, -1, 4, 0, 2, 0]);

    /// `self * other^exp`. Exponents saturate instead of wrapping.
    fn times(self, other: Self, exp: i8) -> Self {
        let mut out = self.0;
        for (slot, o) in out.iter_mut().zip(other.0) {
            *slot = slot.saturating_add(o.saturating_mul(exp));
        }
        Self(out)
    }
}

/// One registry entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDef {
    /// Canonical spelling used in output, e.g. `meter`.
    pub name: &'static str,
    /// Case-sensitive abbreviations, e.g. `m`.
    pub symbols: &'static [&'static str],
    /// Case-insensitive alternative spellings.
    pub aliases: &'static [&'static str],
    pub dimension: Dimension,
    pub factor: f64,
    pub offset: f64,
    /// Accepts SI and binary prefixes, e.g. `km`, `kilometer`, `MiB`.
    pub prefixable: bool,
}

impl UnitDef {
    fn matches_exact(&self, s: &str) -> bool {
        self.name == s || self.symbols.contains(&s) || self.is_plural(s)
    }

    fn matches_name(&self, lower: &str) -> bool {
        self.name.eq_ignore_ascii_case(lower)
            || self.is_plural(lower)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(lower))
    }

    fn is_plural(&self, s: &str) -> bool {
        s.strip_suffix('s').is_some_and(|stem| stem.eq_ignore_ascii_case(self.name))
    }
}

#[derive(Debug, Clone, Copy)]
struct Prefix {
    symbols: &'static [&'static str],
    name: &'static str,
    factor: f64,
}

static PREFIXES: &[Prefix] = &[
    Prefix { symbols: &["n"], name: "nano", factor: 1e-9 },
    Prefix { symbols: &["µ", "μ", "u"], name: "micro", factor: 1e-6 },
    Prefix { symbols: &["m"], name: "milli", factor: 1e-3 },
    Prefix { symbols: &["c"], name: "centi", factor: 1e-2 },
    Prefix { symbols: &["d"], name: "deci", factor: 1e-1 },
    Prefix { symbols: &["h"], name: "hecto", factor: 1e2 },
    Prefix { symbols: &["k"], name: "kilo", factor: 1e3 },
    Prefix { symbols: &["M"], name: "mega", factor: 1e6 },
    Prefix { symbols: &["G"], name: "giga", factor: 1e9 },
    Prefix { symbols: &["T"], name: "tera", factor: 1e12 },
    Prefix { symbols: &["Ki"], name: "kibi", factor: 1024.0 },
    Prefix { symbols: &["Mi"], name: "mebi", factor: 1024.0 * 1024.0 },
    Prefix { symbols: &["Gi"], name: "gibi", factor: 1024.0 * 1024.0 * 1024.0 },
];

const fn unit(
    name: &'static str,
    symbols: &'static [&'static str],
    aliases: &'static [&'static str],
    dimension: Dimension,
    factor: f64,
) -> UnitDef {
    UnitDef { name, symbols, aliases, dimension, factor, offset: 0.0, prefixable: false }
}

const fn si(
    name: &'static str,
    symbols: &'static [&'static str],
    aliases: &'static [&'static str],
    dimension: Dimension,
    factor: f64,
) -> UnitDef {
    UnitDef { name, symbols, aliases, dimension, factor, offset: 0.0, prefixable: true }
}

const POUND_KG: f64 = 0.45359237;
const GALLON_M3: f64 = 3.785411784e-3;
const STANDARD_GRAVITY: f64 = 9.80665;

static UNITS: &[UnitDef] = &[
    // length, base meter
    si("meter", &["m"], &["metre", "metres"], Dimension::LENGTH, 1.0),
    unit("micron", &[], &[], Dimension::LENGTH, 1e-6),
    unit("inch", &["in"], &["inches"], Dimension::LENGTH, 0.0254),
    unit("foot", &["ft"], &["feet"], Dimension::LENGTH, 0.3048),
    unit("yard", &["yd"], &[], Dimension::LENGTH, 0.9144),
    unit("mile", &["mi"], &[], Dimension::LENGTH, 1609.344),
    unit("nautical_mile", &["nmi"], &[], Dimension::LENGTH, 1852.0),
    // mass, base kilogram
    unit("kilogram", &["kg"], &["kilo", "kilos"], Dimension::MASS, 1.0),
    si("gram", &["g"], &["gramme", "grammes"], Dimension::MASS, 1e-3),
    unit("metric_ton", &["t"], &["tonne", "tonnes"], Dimension::MASS, 1e3),
    unit("pound", &["lb", "lbs"], &[], Dimension::MASS, POUND_KG),
    unit("ounce", &["oz"], &[], Dimension::MASS, POUND_KG / 16.0),
    unit("stone", &["st"], &[], Dimension::MASS, POUND_KG * 14.0),
    // time, base second
    si("second", &["s", "sec"], &[], Dimension::TIME, 1.0),
    unit("minute", &["min"], &[], Dimension::TIME, 60.0),
    unit("hour", &["h", "hr"], &[], Dimension::TIME, 3600.0),
    unit("day", &["d"], &[], Dimension::TIME, 86_400.0),
    unit("week", &["wk"], &[], Dimension::TIME, 604_800.0),
    unit("year", &["yr", "a"], &[], Dimension::TIME, 31_557_600.0),
    // area and volume
    unit("hectare", &["ha"], &[], Dimension::AREA, 1e4),
    unit("acre", &["ac"], &[], Dimension::AREA, 4046.8564224),
    si("liter", &["l", "L"], &["litre", "litres"], Dimension::VOLUME, 1e-3),
    unit("gallon", &["gal"], &[], Dimension::VOLUME, GALLON_M3),
    unit("quart", &["qt"], &[], Dimension::VOLUME, GALLON_M3 / 4.0),
    unit("pint", &["pt"], &[], Dimension::VOLUME, GALLON_M3 / 8.0),
    unit("cup", &[], &[], Dimension::VOLUME, GALLON_M3 / 16.0),
    unit("fluid_ounce", &["floz", "fl_oz"], &[], Dimension::VOLUME, GALLON_M3 / 128.0),
    unit("tablespoon", &["tbsp"], &[], Dimension::VOLUME, GALLON_M3 / 256.0),
    unit("teaspoon", &["tsp"], &[], Dimension::VOLUME, GALLON_M3 / 768.0),
    // speed
    unit("mile_per_hour", &["mph", "MPH"], &[], Dimension::SPEED, 1609.344 / 3600.0),
    unit("kilometer_per_hour", &["kph", "KPH"], &[], Dimension::SPEED, 1e3 / 3600.0),
    unit("knot", &["kn", "kt"], &[], Dimension::SPEED, 1852.0 / 3600.0),
    // temperature, base kelvin
    si("kelvin", &["K"], &[], Dimension::TEMPERATURE, 1.0),
    UnitDef {
        name: "degree_Celsius",
        symbols: &["degC", "°C"],
        aliases: &["celsius"],
        dimension: Dimension::TEMPERATURE,
        factor: 1.0,
        offset: 273.15,
        prefixable: false,
    },
    UnitDef {
        name: "degree_Fahrenheit",
        symbols: &["degF", "°F"],
        aliases: &["fahrenheit"],
        dimension: Dimension::TEMPERATURE,
        factor: 5.0 / 9.0,
        offset: 459.67,
        prefixable: false,
    },
    // mechanics
    si("hertz", &["Hz"], &[], Dimension::FREQUENCY, 1.0),
    si("newton", &["N"], &[], Dimension::FORCE, 1.0),
    unit("pound_force", &["lbf"], &[], Dimension::FORCE, POUND_KG * STANDARD_GRAVITY),
    si("pascal", &["Pa"], &[], Dimension::PRESSURE, 1.0),
    si("bar", &[], &[], Dimension::PRESSURE, 1e5),
    unit("standard_atmosphere", &["atm"], &["atmosphere", "atmospheres"], Dimension::PRESSURE, 101_325.0),
    unit("pound_force_per_square_inch", &["psi"], &[], Dimension::PRESSURE, 6894.757293168361),
    si("joule", &["J"], &[], Dimension::ENERGY, 1.0),
    si("calorie", &["cal"], &[], Dimension::ENERGY, 4.184),
    unit("kilocalorie", &["Cal"], &[], Dimension::ENERGY, 4184.0),
    si("watt_hour", &["Wh"], &[], Dimension::ENERGY, 3600.0),
    si("electron_volt", &["eV"], &[], Dimension::ENERGY, 1.602176634e-19),
    si("watt", &["W"], &[], Dimension::POWER, 1.0),
    unit("horsepower", &["hp"], &[], Dimension::POWER, 745.69987158227022),
    // electricity; `C` and `F` are coulomb and farad, never temperatures
    si("ampere", &["A"], &["amp", "amps"], Dimension::CURRENT, 1.0),
    si("coulomb", &["C"], &[], Dimension::CHARGE, 1.0),
    si("volt", &["V"], &[], Dimension::VOLTAGE, 1.0),
    si("ohm", &["Ω"], &[], Dimension::RESISTANCE, 1.0),
    si("farad", &["F"], &[], Dimension::CAPACITANCE, 1.0),
    // information, base bit
    si("bit", &["b"], &[], Dimension::INFORMATION, 1.0),
    si("byte", &["B"], &[], Dimension::INFORMATION, 8.0),
];

/// A resolved unit expression, ready to convert values.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    /// Output spelling, e.g. `kilogram / meter ** 3`.
    pub name: String,
    pub dimension: Dimension,
    pub factor: f64,
    pub offset: f64,
}

impl Unit {
    fn to_base(&self, value: f64) -> f64 {
        (value + self.offset) * self.factor
    }

    fn from_base(&self, value: f64) -> f64 {
        value / self.factor - self.offset
    }

    fn prefixed(def: &UnitDef, prefix: Option<&Prefix>) -> Self {
        let (name, scale) = match prefix {
            Some(p) => (format!("{}{}", p.name, def.name), p.factor),
            None => (def.name.to_owned(), 1.0),
        };
        Self { name, dimension: def.dimension, factor: def.factor * scale, offset: def.offset }
    }
}

/// Read-only view over the unit table.
#[derive(Debug, Clone, Copy)]
pub struct UnitRegistry {
    units: &'static [UnitDef],
    prefixes: &'static [Prefix],
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self { units: UNITS, prefixes: PREFIXES }
    }
}

impl UnitRegistry {
    /// Resolve a single unit term without exponent.
    ///
    /// Exact names, symbols and plurals win, then prefixed symbols, then
    /// prefixed names, then case-insensitive names and aliases.
    fn lookup_term(&self, s: &str) -> Option<Unit> {
        if let Some(def) = self.units.iter().find(|u| u.matches_exact(s)) {
            return Some(Unit::prefixed(def, None));
        }
        let prefixable = || self.units.iter().filter(|u| u.prefixable);
        for p in self.prefixes {
            for rest in p.symbols.iter().filter_map(|sym| s.strip_prefix(*sym)) {
                if let Some(def) = prefixable().find(|u| u.symbols.contains(&rest)) {
                    return Some(Unit::prefixed(def, Some(p)));
                }
            }
        }
        let lower = s.to_lowercase();
        for p in self.prefixes {
            if let Some(rest) = lower.strip_prefix(p.name) {
                if let Some(def) = prefixable().find(|u| u.matches_name(rest)) {
                    return Some(Unit::prefixed(def, Some(p)));
                }
            }
        }
        self.units.iter().find(|u| u.matches_name(&lower)).map(|def| Unit::prefixed(def, None))
    }

    /// Resolve a unit expression such as `km`, `m/s`, `kg/m**3` or `1/s`.
    pub fn lookup(&self, expr: &str) -> Result<Unit> {
        let expr = expr.trim();
        let unknown = || ConvertError::UnknownUnit(expr.to_owned());
        let normalized = expr.replace("**", "^").replace("_per_", "/").replace(" per ", "/");

        let mut terms: Vec<(Unit, i8)> = Vec::new();
        let mut sign = 1i8;
        let mut rest = normalized.as_str();
        loop {
            let cut = rest.find(['*', '/']).unwrap_or(rest.len());
            let term = rest[..cut].trim();
            if term.is_empty() {
                return Err(unknown());
            }
            if term != "1" {
                let (unit, exp) = self.parse_term(term).ok_or_else(unknown)?;
                terms.push((unit, exp.saturating_mul(sign)));
            }
            match rest[cut..].chars().next() {
                Some(op) => {
                    sign = if op == '/' { -1 } else { 1 };
                    rest = &rest[cut + 1..];
                }
                None => break,
            }
        }

        match terms.as_slice() {
            [] => Ok(Unit {
                name: "dimensionless".to_owned(),
                dimension: Dimension::NONE,
                factor: 1.0,
                offset: 0.0,
            }),
            [(unit, 1)] => Ok(unit.clone()),
            _ if terms.iter().any(|(u, _)| u.offset != 0.0) => Err(unknown()),
            _ => Ok(compose(&terms)),
        }
    }

    /// Split a term into unit and exponent: `m^2`, `m2`, `square_meter`.
    fn parse_term(&self, term: &str) -> Option<(Unit, i8)> {
        let (base, exp) = match term.split_once('^') {
            Some((base, exp)) => (base.trim(), exp.trim().parse::<i8>().ok()?),
            None => {
                let base = term.trim_end_matches(|c: char| c.is_ascii_digit());
                let exp = if base.len() < term.len() { term[base.len()..].parse().ok()? } else { 1 };
                (base, exp)
            }
        };
        let (base, power) = if let Some(b) = base.strip_prefix("square_").or_else(|| base.strip_prefix("sq_")) {
            (b, 2)
        } else if let Some(b) = base.strip_prefix("cubic_") {
            (b, 3)
        } else {
            (base, 1)
        };
        if base.is_empty() {
            return None;
        }
        Some((self.lookup_term(base)?, exp.saturating_mul(power)))
    }

    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<(f64, Unit)> {
        let src = self.lookup(from)?;
        let dst = self.lookup(to)?;
        if src.dimension != dst.dimension {
            return Err(ConvertError::IncompatibleUnits {
                from: from.trim().to_owned(),
                to: to.trim().to_owned(),
            });
        }
        Ok((dst.from_base(src.to_base(value)), dst))
    }
}

/// Multiply out `(unit, exponent)` terms and spell them as
/// `a * b / c ** 2`, or `1 / c` without a numerator.
fn compose(terms: &[(Unit, i8)]) -> Unit {
    let mut dimension = Dimension::NONE;
    let (mut above, mut below) = (1.0, 1.0);
    for (unit, exp) in terms {
        dimension = dimension.times(unit.dimension, *exp);
        let scale = unit.factor.powi(i32::from(exp.unsigned_abs()));
        if *exp > 0 { above *= scale } else { below *= scale }
    }

    let spell = |name: &str, exp: i8| match exp {
        1 => name.to_owned(),
        e => format!("{name} ** {e}"),
    };
    let numerator: Vec<String> =
        terms.iter().filter(|(_, e)| *e > 0).map(|(u, e)| spell(&u.name, *e)).collect();
    let mut name = if numerator.is_empty() { "1".to_owned() } else { numerator.join(" * ") };
    for (unit, exp) in terms.iter().filter(|(_, e)| *e < 0) {
        name.push_str(" / ");
        name.push_str(&spell(&unit.name, exp.saturating_neg()));
    }

    Unit { name, dimension, factor: above / below, offset: 0.0 }
}

/// Convert and format as `{input: "1.0 km", output: "1000.0 meter"}`.
pub fn convert_units(
    registry: &UnitRegistry,
    value: f64,
    from_unit: &str,
    to_unit: &str,
) -> Result<ConversionOutput> {
    let (result, unit) = registry.convert(value, from_unit, to_unit)?;
    Ok(ConversionOutput {
        input: format!("{} {}", format_number(value), from_unit.trim()),
        output: format!("{} {}", format_number(result), unit.name),
    })
}

/// Shortest round-trip form with a `.0` on integral values. Magnitudes below
/// `1e-4` or from `1e16` up switch to `1e-07` / `1e+16` exponent notation.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-4..1e16).contains(&magnitude) {
        return format!("{value:?}");
    }
    let sci = format!("{value:e}");
    match sci.split_once('e').map(|(m, e)| (m, e.parse::<i32>())) {
        Some((mantissa, Ok(exp))) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
        _ => sci,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn registry() -> UnitRegistry {
        UnitRegistry::default()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn km_to_m() {
        let out = convert_units(&registry(), 1.0, "km", "m").unwrap();
        assert_eq!(out.input, "1.0 km");
        assert_eq!(out.output, "1000.0 meter");
    }

    #[test]
    fn names_and_plurals_resolve() {
        let r = registry();
        assert_eq!(r.lookup("meters").unwrap().name, "meter");
        assert_eq!(r.lookup("Feet").unwrap().name, "foot");
        assert_eq!(r.lookup("Kilograms").unwrap().name, "kilogram");
        assert_eq!(r.lookup("millilitres").unwrap().name, "milliliter");
    }

    #[test]
    fn exact_symbol_beats_case_insensitive_name() {
        let r = registry();
        assert_eq!(r.lookup("B").unwrap().name, "byte");
        assert_eq!(r.lookup("b").unwrap().name, "bit");
        assert_eq!(r.lookup("MB").unwrap().name, "megabyte");
        assert_eq!(r.lookup("min").unwrap().name, "minute");
        assert_eq!(r.lookup("ha").unwrap().name, "hectare");
    }

    #[test]
    fn prefixes_compose_with_si_units() {
        let r = registry();
        let (nm, unit) = r.convert(1.0, "m", "nm").unwrap();
        assert!(close(nm, 1e9), "{nm}");
        assert_eq!(unit.name, "nanometer");

        let (us, unit) = r.convert(2.0, "ms", "µs").unwrap();
        assert!(close(us, 2000.0), "{us}");
        assert_eq!(unit.name, "microsecond");

        let (mg, _) = r.convert(1.0, "kg", "mg").unwrap();
        assert!(close(mg, 1e6), "{mg}");
        let (kib, _) = r.convert(2048.0, "B", "KiB").unwrap();
        assert!(close(kib, 2.0), "{kib}");
    }

    #[test]
    fn frequency_power_and_force_are_dimensions() {
        let r = registry();
        let out = convert_units(&r, 2.5, "MHz", "kHz").unwrap();
        assert_eq!(out.output, "2500.0 kilohertz");

        let (w, _) = r.convert(1.0, "hp", "W").unwrap();
        assert!(close(w, 745.69987158227022), "{w}");
        let (n, _) = r.convert(1.0, "kN", "N").unwrap();
        assert!(close(n, 1000.0), "{n}");

        let err = r.convert(1.0, "W", "N").unwrap_err();
        assert!(matches!(err, ConvertError::IncompatibleUnits { .. }));
        let (w, unit) = r.convert(3.0, "J/s", "W").unwrap();
        assert!(close(w, 3.0), "{w}");
        assert_eq!(unit.name, "watt");
    }

    #[test]
    fn compound_expressions_convert() {
        let r = registry();
        let (density, unit) = r.convert(1.0, "mg/ml", "kg/m**3").unwrap();
        assert!(close(density, 1.0), "{density}");
        assert_eq!(unit.name, "kilogram / meter ** 3");

        let (speed, unit) = r.convert(36.0, "km/h", "m/s").unwrap();
        assert!(close(speed, 10.0), "{speed}");
        assert_eq!(unit.name, "meter / second");

        let (area, unit) = r.convert(1.0, "ha", "m^2").unwrap();
        assert!(close(area, 1e4), "{area}");
        assert_eq!(unit.name, "meter ** 2");

        let (hz, unit) = r.convert(60.0, "1/min", "Hz").unwrap();
        assert!(close(hz, 1.0), "{hz}");
        assert_eq!(unit.name, "hertz");
        assert_eq!(r.lookup("1/s").unwrap().name, "1 / second");
        assert_eq!(r.lookup("square_feet").unwrap().dimension, Dimension::AREA);
    }

    #[test]
    fn malformed_expressions_are_unknown() {
        let r = registry();
        for expr in ["m//s", "m^x", "/s", "degC/s", "furlong*m"] {
            let err = r.lookup(expr).unwrap_err();
            assert!(matches!(err, ConvertError::UnknownUnit(ref u) if u == expr), "{expr}: {err}");
        }
    }

    #[test]
    fn temperatures_use_offsets() {
        let r = registry();
        let (f, _) = r.convert(100.0, "degC", "°F").unwrap();
        assert!((f - 212.0).abs() < 1e-9, "{f}");
        let (k, _) = r.convert(0.0, "celsius", "K").unwrap();
        assert!((k - 273.15).abs() < 1e-9, "{k}");
    }

    #[test]
    fn bare_c_and_f_are_electrical_units() {
        let r = registry();
        assert_eq!(r.lookup("C").unwrap().name, "coulomb");
        assert_eq!(r.lookup("F").unwrap().name, "farad");
        let err = convert_units(&r, 1.0, "C", "K").unwrap_err();
        assert!(matches!(err, ConvertError::IncompatibleUnits { .. }));
        let (mc, _) = r.convert(1.0, "A*s", "mC").unwrap();
        assert!(close(mc, 1000.0), "{mc}");
    }

    #[test]
    fn imperial_lengths_convert() {
        let (ft, unit) = registry().convert(1.0, "mi", "ft").unwrap();
        assert!((ft - 5280.0).abs() < 1e-6, "{ft}");
        assert_eq!(unit.name, "foot");
    }

    #[test]
    fn different_dimensions_are_incompatible() {
        let err = convert_units(&registry(), 1.0, "kg", "m").unwrap_err();
        assert!(matches!(err, ConvertError::IncompatibleUnits { .. }));
    }

    #[test]
    fn unknown_unit_is_reported() {
        let err = convert_units(&registry(), 1.0, "furlongs_per_fortnight", "m").unwrap_err();
        assert!(matches!(err, ConvertError::UnknownUnit(u) if u == "furlongs_per_fortnight"));
    }

    #[test]
    fn integral_results_keep_trailing_zero() {
        assert_eq!(format_number(1000.0), "1000.0");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(2.54), "2.54");
        assert_eq!(format_number(1e15), "1000000000000000.0");
        assert_eq!(format_number(0.0001), "0.0001");
    }

    #[test]
    fn extreme_magnitudes_use_signed_two_digit_exponents() {
        assert_eq!(format_number(1e16), "1e+16");
        assert_eq!(format_number(1e-7), "1e-07");
        assert_eq!(format_number(-1.5e-5), "-1.5e-05");
        assert_eq!(format_number(2.5e300), "2.5e+300");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }
}
