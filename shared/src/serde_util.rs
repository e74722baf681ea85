//! serde 辅助模块
//!
//! 后端（Eloquent 模型）把 decimal 列序列化成 JSON 字符串还是数字
//! 取决于数据库驱动，两种形态都在线上出现过，这里统一兼容。

/// `#[serde(with = "serde_util::lenient_price")]` — 数字或字符串形式的价格
pub mod lenient_price {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    pub fn serialize<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(*price)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::String(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Priced {
        #[serde(with = "super::lenient_price")]
        price: f64,
    }

    #[test]
    fn accepts_numeric_and_string_prices() {
        let n: Priced = serde_json::from_str(r#"{"price": 19.9}"#).unwrap();
        assert_eq!(n.price, 19.9);

        let s: Priced = serde_json::from_str(r#"{"price": "19.90"}"#).unwrap();
        assert_eq!(s.price, 19.9);
    }

    #[test]
    fn rejects_garbage_prices() {
        assert!(serde_json::from_str::<Priced>(r#"{"price": "not a number"}"#).is_err());
        assert!(serde_json::from_str::<Priced>(r#"{"price": null}"#).is_err());
    }
}
