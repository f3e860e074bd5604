//! Static product catalog.
//!
//! The catalog is a fixed list compiled into the binary. It is built once at
//! startup and shared read-only through `AppState`.

use rust_decimal::Decimal;
use solar_direct_core::{Category, CurrencyCode, Price, Product, ProductId};

/// Read-only product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::solar_direct()
    }
}

impl Catalog {
    /// Build a catalog from a product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The SolarDirect product line.
    #[must_use]
    pub fn solar_direct() -> Self {
        Self::new(vec![
            product(
                "p1",
                "EcoPower 450W Monocrystalline",
                "Ultra-high efficiency solar panel designed for residential rooftops. \
                 Features PERC technology for superior low-light performance.",
                299,
                Category::Panels,
                "solar1",
                "21.5%",
                "25 Years",
                4.8,
            ),
            product(
                "p2",
                "SunGuardian Battery 10kWh",
                "Stackable lithium-iron phosphate battery storage system. \
                 Keep your home powered through the night and during outages.",
                5499,
                Category::Batteries,
                "battery1",
                "95% Round-trip",
                "10 Years",
                4.9,
            ),
            product(
                "p3",
                "SmartFlow Hybrid Inverter 5kW",
                "Advanced hybrid inverter that manages both solar generation and battery \
                 storage seamlessly with mobile app tracking.",
                1250,
                Category::Inverters,
                "inverter1",
                "97.6%",
                "12 Years",
                4.7,
            ),
            product(
                "p4",
                "Off-Grid Cabin Kit Pro",
                "Complete DIY solar kit including 4 panels, charge controller, cables, \
                 and 24V battery bank. Perfect for remote cabins.",
                2100,
                Category::Kits,
                "kit1",
                "All-inclusive",
                "5 Years Overall",
                4.5,
            ),
            product(
                "p5",
                "MaxEfficiency 550W Bifacial",
                "Captures sunlight from both sides, increasing yield by up to 25%. \
                 Ideal for ground-mounted commercial arrays.",
                450,
                Category::Panels,
                "solar2",
                "22.8%",
                "30 Years",
                5.0,
            ),
            product(
                "p6",
                "Compact Portable Solar 100W",
                "Foldable solar charger with USB-C and DC outputs. \
                 Charge your laptop and phones while camping or on the road.",
                159,
                Category::Panels,
                "portable1",
                "23%",
                "2 Years",
                4.6,
            ),
        ])
    }

    /// Every product, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products in `filter` (or any category) whose name or description
    /// contains `query`, case-insensitively.
    #[must_use]
    pub fn search(&self, filter: Option<Category>, query: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| filter.is_none_or(|c| p.category == c))
            .filter(|p| p.matches_query(query))
            .collect()
    }

    /// Top `n` products by rating. Ties keep catalog order.
    #[must_use]
    pub fn featured(&self, n: usize) -> Vec<&Product> {
        let mut ranked: Vec<&Product> = self.products.iter().collect();
        ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        ranked.truncate(n);
        ranked
    }

    /// Up to `n` other products in the same category as `product`.
    #[must_use]
    pub fn related(&self, product: &Product, n: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(n)
            .collect()
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    description: &str,
    dollars: i64,
    category: Category,
    image_seed: &str,
    efficiency: &str,
    warranty: &str,
    rating: f32,
) -> Product {
    Product {
        id: ProductId::from(id),
        name: name.to_string(),
        description: description.to_string(),
        price: Price::new(Decimal::new(dollars, 0), CurrencyCode::USD),
        category,
        image: format!("https://picsum.photos/seed/{image_seed}/600/400"),
        efficiency: efficiency.to_string(),
        warranty: warranty.to_string(),
        rating,
    }
}
