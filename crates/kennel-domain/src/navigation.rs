//! Typed dashboard navigation key.
//!
//! The dashboard historically encoded its location as `"<tab>_<subtab>"`
//! strings. [`DashboardView`] keeps that text form for links and saved state
//! while making every reachable view an explicit variant.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::results::{ParseError, ParseTarget};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum InventoryView {
    Items,
    AddItem,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SalesView {
    Log,
    Refunds,
    Payouts,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExpenseView {
    Bills,
    Transport,
    DeliveryMap,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BreedingView {
    Dogs,
    Litters,
    Puppies,
    Buyers,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReportView {
    Profit,
    Platforms,
    Yearly,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AdminView {
    Credentials,
    Domains,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(tag = "tab", content = "view", rename_all = "snake_case")]
/// A sidebar tab together with its selected sub-view.
pub enum DashboardView {
    #[default]
    Overview,
    Inventory(InventoryView),
    Sales(SalesView),
    Expenses(ExpenseView),
    Breeding(BreedingView),
    Reports(ReportView),
    Admin(AdminView),
}

impl DashboardView {
    pub fn tab(&self) -> &'static str {
        match self {
            DashboardView::Overview => "overview",
            DashboardView::Inventory(_) => "inventory",
            DashboardView::Sales(_) => "sales",
            DashboardView::Expenses(_) => "expenses",
            DashboardView::Breeding(_) => "breeding",
            DashboardView::Reports(_) => "reports",
            DashboardView::Admin(_) => "admin",
        }
    }

    pub fn sub_tab(&self) -> Option<&'static str> {
        let sub = match self {
            DashboardView::Overview => return None,
            DashboardView::Inventory(InventoryView::Items) => "items",
            DashboardView::Inventory(InventoryView::AddItem) => "add",
            DashboardView::Sales(SalesView::Log) => "log",
            DashboardView::Sales(SalesView::Refunds) => "refunds",
            DashboardView::Sales(SalesView::Payouts) => "payouts",
            DashboardView::Expenses(ExpenseView::Bills) => "bills",
            DashboardView::Expenses(ExpenseView::Transport) => "transport",
            DashboardView::Expenses(ExpenseView::DeliveryMap) => "map",
            DashboardView::Breeding(BreedingView::Dogs) => "dogs",
            DashboardView::Breeding(BreedingView::Litters) => "litters",
            DashboardView::Breeding(BreedingView::Puppies) => "puppies",
            DashboardView::Breeding(BreedingView::Buyers) => "buyers",
            DashboardView::Reports(ReportView::Profit) => "profit",
            DashboardView::Reports(ReportView::Platforms) => "platforms",
            DashboardView::Reports(ReportView::Yearly) => "yearly",
            DashboardView::Admin(AdminView::Credentials) => "credentials",
            DashboardView::Admin(AdminView::Domains) => "domains",
        };
        Some(sub)
    }

    /// Views whose data must only be served after server-side authorization.
    pub fn requires_authorization(&self) -> bool {
        matches!(self, DashboardView::Admin(_))
    }

    fn default_for_tab(tab: &str) -> Option<Self> {
        let view = match tab {
            "overview" | "dashboard" => DashboardView::Overview,
            "inventory" => DashboardView::Inventory(InventoryView::Items),
            "sales" => DashboardView::Sales(SalesView::Log),
            "expenses" => DashboardView::Expenses(ExpenseView::Bills),
            "breeding" => DashboardView::Breeding(BreedingView::Dogs),
            "reports" => DashboardView::Reports(ReportView::Profit),
            "admin" => DashboardView::Admin(AdminView::Credentials),
            _ => return None,
        };
        Some(view)
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_tab() {
            Some(sub) => write!(f, "{}_{}", self.tab(), sub),
            None => f.write_str(self.tab()),
        }
    }
}

impl FromStr for DashboardView {
    type Err = ParseError;

    /// Parses the legacy `tab_subtab` key. A bare tab selects its first sub-view.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_ascii_lowercase();
        let (tab, sub) = match normalized.split_once('_') {
            Some((tab, sub)) => (tab, Some(sub)),
            None => (normalized.as_str(), None),
        };
        let base =
            Self::default_for_tab(tab).ok_or_else(|| ParseError::new(ParseTarget::View, input))?;
        let Some(sub) = sub else {
            return Ok(base);
        };
        let view = match (base, sub) {
            (DashboardView::Inventory(_), "items") => DashboardView::Inventory(InventoryView::Items),
            (DashboardView::Inventory(_), "add") => DashboardView::Inventory(InventoryView::AddItem),
            (DashboardView::Sales(_), "log") => DashboardView::Sales(SalesView::Log),
            (DashboardView::Sales(_), "refunds") => DashboardView::Sales(SalesView::Refunds),
            (DashboardView::Sales(_), "payouts") => DashboardView::Sales(SalesView::Payouts),
            (DashboardView::Expenses(_), "bills") => DashboardView::Expenses(ExpenseView::Bills),
            (DashboardView::Expenses(_), "transport") => {
                DashboardView::Expenses(ExpenseView::Transport)
            }
            (DashboardView::Expenses(_), "map") => DashboardView::Expenses(ExpenseView::DeliveryMap),
            (DashboardView::Breeding(_), "dogs") => DashboardView::Breeding(BreedingView::Dogs),
            (DashboardView::Breeding(_), "litters") => DashboardView::Breeding(BreedingView::Litters),
            (DashboardView::Breeding(_), "puppies") => DashboardView::Breeding(BreedingView::Puppies),
            (DashboardView::Breeding(_), "buyers") => DashboardView::Breeding(BreedingView::Buyers),
            (DashboardView::Reports(_), "profit") => DashboardView::Reports(ReportView::Profit),
            (DashboardView::Reports(_), "platforms") => DashboardView::Reports(ReportView::Platforms),
            (DashboardView::Reports(_), "yearly") => DashboardView::Reports(ReportView::Yearly),
            (DashboardView::Admin(_), "credentials") => DashboardView::Admin(AdminView::Credentials),
            (DashboardView::Admin(_), "domains") => DashboardView::Admin(AdminView::Domains),
            _ => return Err(ParseError::new(ParseTarget::View, input)),
        };
        Ok(view)
    }
}
