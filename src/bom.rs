//! Bill-of-Materials graph engine (§4.3).
//!
//! Nodes are [`Product`]s, edges are [`ProductComponent`] rows. Articles
//! and services are always leaves; nomenclatures may depend on any
//! product, including other nomenclatures. All roll-ups recompute on each
//! call — memo-free within a call, as the spec requires — since the graph
//! is expected to stay in the low thousands of nodes.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::domain::{PriceCalculationMode, Product, ProductComponent, ProductType};
use crate::error::{CoreError, CoreResult};

/// Read-only view over the graph needed by the roll-up functions. Callers
/// typically build this from the products/product_components tables held
/// by the caller's unit-of-work snapshot (§5 "BOM roll-ups are executed
/// against a consistent snapshot").
pub struct BomGraph<'a> {
    products: HashMap<i64, &'a Product>,
    edges_by_parent: HashMap<i64, Vec<&'a ProductComponent>>,
}

impl<'a> BomGraph<'a> {
    pub fn build(products: &'a [Product], edges: &'a [ProductComponent]) -> Self {
        let products = products.iter().map(|p| (p.audit.id, p)).collect();
        let mut edges_by_parent: HashMap<i64, Vec<&ProductComponent>> = HashMap::new();
        for edge in edges {
            edges_by_parent.entry(edge.parent_id).or_default().push(edge);
        }
        BomGraph { products, edges_by_parent }
    }

    fn product(&self, id: i64) -> CoreResult<&'a Product> {
        self.products.get(&id).copied().ok_or(CoreError::not_found("product", id))
    }

    fn children(&self, id: i64) -> &[&'a ProductComponent] {
        self.edges_by_parent.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Cost roll-up for `product_id` (§4.3 "Cost roll-up").
    pub fn cost_roll_up(&self, product_id: i64) -> CoreResult<Decimal> {
        let product = self.product(product_id)?;
        match product.product_type {
            ProductType::Article | ProductType::Service => Ok(product.cost_price.unwrap_or(Decimal::ZERO)),
            ProductType::Nomenclature => match product.price_calculation_mode {
                PriceCalculationMode::Manual | PriceCalculationMode::FromCostMargin => {
                    Ok(product.cost_price.unwrap_or(Decimal::ZERO))
                }
                PriceCalculationMode::FromComponents => {
                    let mut total = Decimal::ZERO;
                    for edge in self.children(product_id) {
                        total += edge.quantity * self.cost_roll_up(edge.component_id)?;
                    }
                    Ok(total)
                }
            },
        }
    }

    /// Price roll-up for `product_id` (§4.3 "Price roll-up").
    pub fn price_roll_up(&self, product_id: i64) -> CoreResult<Decimal> {
        let product = self.product(product_id)?;
        match product.product_type {
            ProductType::Article | ProductType::Service => Ok(product.sale_price.unwrap_or(Decimal::ZERO)),
            ProductType::Nomenclature => match product.price_calculation_mode {
                PriceCalculationMode::Manual => Ok(product.sale_price.unwrap_or(Decimal::ZERO)),
                PriceCalculationMode::FromCostMargin => {
                    let cost = product.cost_price.unwrap_or(Decimal::ZERO);
                    let margin = product.margin_percentage.unwrap_or(Decimal::ZERO);
                    Ok(cost * (Decimal::ONE + margin / Decimal::ONE_HUNDRED))
                }
                PriceCalculationMode::FromComponents => {
                    let mut total = Decimal::ZERO;
                    for edge in self.children(product_id) {
                        total += edge.quantity * self.price_roll_up(edge.component_id)?;
                    }
                    Ok(total)
                }
            },
        }
    }

    /// Weight roll-up for `product_id` (§4.3 "Weight roll-up"). Services
    /// always contribute zero.
    pub fn weight_roll_up(&self, product_id: i64) -> CoreResult<Decimal> {
        let product = self.product(product_id)?;
        match product.product_type {
            ProductType::Service => Ok(Decimal::ZERO),
            ProductType::Article => Ok(product.net_weight.unwrap_or(Decimal::ZERO)),
            ProductType::Nomenclature => {
                let mut total = Decimal::ZERO;
                for edge in self.children(product_id) {
                    total += edge.quantity * self.weight_roll_up(edge.component_id)?;
                }
                Ok(total)
            }
        }
    }

    /// Nested depth-first tree view (§4.3 "Tree view").
    pub fn tree(&self, product_id: i64) -> CoreResult<BomTreeNode> {
        self.tree_at(product_id, Decimal::ONE, 0)
    }

    fn tree_at(&self, product_id: i64, quantity: Decimal, level: usize) -> CoreResult<BomTreeNode> {
        let product = self.product(product_id)?;
        let mut components = Vec::new();
        for edge in self.children(product_id) {
            components.push(self.tree_at(edge.component_id, edge.quantity, level + 1)?);
        }
        Ok(BomTreeNode { reference: product.reference.clone(), quantity, level, components })
    }

    /// Flat, reference-accumulated requisition view (§4.3 "Flat view").
    pub fn flatten(&self, product_id: i64) -> CoreResult<Vec<BomFlatLine>> {
        let mut accumulator: HashMap<String, Decimal> = HashMap::new();
        self.flatten_into(product_id, Decimal::ONE, &mut accumulator)?;
        let mut lines: Vec<BomFlatLine> = accumulator
            .into_iter()
            .map(|(reference, quantity)| BomFlatLine { reference, quantity })
            .collect();
        lines.sort_by(|a, b| a.reference.cmp(&b.reference));
        Ok(lines)
    }

    fn flatten_into(&self, product_id: i64, quantity: Decimal, acc: &mut HashMap<String, Decimal>) -> CoreResult<()> {
        let product = self.product(product_id)?;
        let children = self.children(product_id);
        if children.is_empty() {
            *acc.entry(product.reference.clone()).or_insert(Decimal::ZERO) += quantity;
            return Ok(());
        }
        for edge in children {
            self.flatten_into(edge.component_id, quantity * edge.quantity, acc)?;
        }
        Ok(())
    }

    /// Reject an edge that would introduce a cycle or a self-reference
    /// (§4.3 "Cycle guard"). `edges` passed to [`BomGraph::build`] should
    /// already include the candidate edge being validated; this only
    /// performs the DFS search from `component_id` for `parent_id`.
    pub fn check_no_cycle(&self, parent_id: i64, component_id: i64) -> CoreResult<()> {
        if parent_id == component_id {
            return Err(CoreError::conflict("a product cannot be its own component").with_detail("kind", "cycle"));
        }
        if self.reaches(component_id, parent_id, &mut Vec::new()) {
            return Err(CoreError::conflict(format!(
                "adding component {component_id} to {parent_id} would create a cycle"
            ))
            .with_detail("kind", "cycle"));
        }
        Ok(())
    }

    fn reaches(&self, from: i64, target: i64, visited: &mut Vec<i64>) -> bool {
        if from == target {
            return true;
        }
        if visited.contains(&from) {
            return false;
        }
        visited.push(from);
        self.children(from).iter().any(|edge| self.reaches(edge.component_id, target, visited))
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BomTreeNode {
    pub reference: String,
    pub quantity: Decimal,
    pub level: usize,
    pub components: Vec<BomTreeNode>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BomFlatLine {
    pub reference: String,
    pub quantity: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuditFields, SoftDelete};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn leaf(id: i64, reference: &str, cost: Decimal, sale: Decimal, weight: Decimal) -> Product {
        Product {
            audit: AuditFields { id, ..AuditFields::new(Utc::now(), 1) },
            soft_delete: SoftDelete::default(),
            product_type: ProductType::Article,
            reference: reference.to_string(),
            designation_es: reference.to_string(),
            designation_en: None,
            designation_fr: None,
            short_designation: None,
            unit_code: None,
            family_type_code: None,
            matter_code: None,
            sales_type_code: None,
            origin_country_code: None,
            purchase_price: None,
            cost_price: Some(cost),
            sale_price: Some(sale),
            sale_price_eur: None,
            margin_percentage: None,
            stock_quantity: None,
            minimum_stock: None,
            stock_location: None,
            net_weight: Some(weight),
            gross_weight: None,
            length: None,
            width: None,
            height: None,
            volume: None,
            price_calculation_mode: PriceCalculationMode::Manual,
        }
    }

    fn nomenclature(id: i64, reference: &str, mode: PriceCalculationMode) -> Product {
        Product { product_type: ProductType::Nomenclature, price_calculation_mode: mode, ..leaf(id, reference, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO) }
    }

    fn edge(parent: i64, component: i64, quantity: Decimal) -> ProductComponent {
        ProductComponent {
            audit: AuditFields::new(Utc::now(), 1),
            parent_id: parent,
            component_id: component,
            quantity,
            notes: None,
        }
    }

    #[test]
    fn cost_and_weight_roll_up_two_level_assembly() {
        let products = vec![
            nomenclature(1, "ASSY-1", PriceCalculationMode::FromComponents),
            leaf(2, "BOLT", dec!(0.10), dec!(0.25), dec!(0.02)),
            leaf(3, "PLATE", dec!(2.00), dec!(5.00), dec!(1.50)),
        ];
        let edges = vec![edge(1, 2, dec!(4)), edge(1, 3, dec!(1))];
        let graph = BomGraph::build(&products, &edges);

        assert_eq!(graph.cost_roll_up(1).unwrap(), dec!(2.40));
        assert_eq!(graph.price_roll_up(1).unwrap(), dec!(6.00));
        assert_eq!(graph.weight_roll_up(1).unwrap(), dec!(1.58));
    }

    #[test]
    fn from_cost_margin_mode_derives_price_from_cost() {
        let mut top = nomenclature(1, "TOP", PriceCalculationMode::FromCostMargin);
        top.cost_price = Some(dec!(100));
        top.margin_percentage = Some(dec!(25));
        let graph = BomGraph::build(std::slice::from_ref(&top), &[]);
        assert_eq!(graph.price_roll_up(1).unwrap(), dec!(125));
    }

    #[test]
    fn flatten_accumulates_by_reference_across_branches() {
        let products = vec![
            nomenclature(1, "ASSY", PriceCalculationMode::FromComponents),
            nomenclature(2, "SUB", PriceCalculationMode::FromComponents),
            leaf(3, "SCREW", dec!(0.05), dec!(0.10), dec!(0.01)),
        ];
        let edges = vec![edge(1, 2, dec!(2)), edge(1, 3, dec!(1)), edge(2, 3, dec!(3))];
        let graph = BomGraph::build(&products, &edges);

        let flat = graph.flatten(1).unwrap();
        assert_eq!(flat, vec![BomFlatLine { reference: "SCREW".to_string(), quantity: dec!(7) }]);
    }

    #[test]
    fn tree_view_nests_components_with_levels() {
        let products = vec![
            nomenclature(1, "ASSY", PriceCalculationMode::FromComponents),
            leaf(2, "BOLT", dec!(0.10), dec!(0.25), dec!(0.02)),
        ];
        let edges = vec![edge(1, 2, dec!(4))];
        let graph = BomGraph::build(&products, &edges);

        let tree = graph.tree(1).unwrap();
        assert_eq!(tree.level, 0);
        assert_eq!(tree.components.len(), 1);
        assert_eq!(tree.components[0].level, 1);
        assert_eq!(tree.components[0].quantity, dec!(4));
    }

    #[test]
    fn rejects_self_edge() {
        let products = vec![nomenclature(1, "ASSY", PriceCalculationMode::FromComponents)];
        let graph = BomGraph::build(&products, &[]);
        assert!(graph.check_no_cycle(1, 1).is_err());
    }

    #[test]
    fn rejects_edge_that_would_close_a_cycle() {
        // P1 -> P2 -> P3; adding P3 -> P1 must fail (S4).
        let products = vec![
            nomenclature(1, "P1", PriceCalculationMode::FromComponents),
            nomenclature(2, "P2", PriceCalculationMode::FromComponents),
            nomenclature(3, "P3", PriceCalculationMode::FromComponents),
        ];
        let edges = vec![edge(1, 2, dec!(1)), edge(2, 3, dec!(1))];
        let graph = BomGraph::build(&products, &edges);
        let err = graph.check_no_cycle(3, 1).unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn accepts_edge_that_does_not_close_a_cycle() {
        let products = vec![
            nomenclature(1, "P1", PriceCalculationMode::FromComponents),
            nomenclature(2, "P2", PriceCalculationMode::FromComponents),
            nomenclature(3, "P3", PriceCalculationMode::FromComponents),
        ];
        let edges = vec![edge(1, 2, dec!(1))];
        let graph = BomGraph::build(&products, &edges);
        assert!(graph.check_no_cycle(1, 3).is_ok());
    }
}
