//! FILENAME: core/schema/src/catalog.rs
//! The MESSAGEix parameter catalogue, one entry per parameter, grouped the
//! same way as `CATEGORIES`.

use crate::ParameterSpec;

pub(crate) static PARAMETERS: &[ParameterSpec] = &[
    // Core Technology Input–Output
    ParameterSpec::float(
        "input",
        &["node_loc", "tec", "year_vtg", "year_act", "mode", "node_origin", "commodity", "level", "time", "time_origin"],
        "Quantity of input commodity required per unit of technology activity",
    ),
    ParameterSpec::float(
        "output",
        &["node_loc", "tec", "year_vtg", "year_act", "mode", "node_dest", "commodity", "level", "time", "time_dest"],
        "Quantity of output commodity produced per unit of activity",
    ),
    ParameterSpec::float(
        "input_cap",
        &["node_loc", "tec", "year_vtg", "year_act", "node_origin", "commodity", "level", "time_origin"],
        "Input flow per unit of installed capacity",
    ),
    ParameterSpec::float(
        "output_cap",
        &["node_loc", "tec", "year_vtg", "year_act", "node_dest", "commodity", "level", "time_dest"],
        "Output flow per unit of installed capacity",
    ),
    ParameterSpec::float(
        "input_cap_new",
        &["node_loc", "tec", "year_vtg", "node_origin", "commodity", "level", "time_origin"],
        "Input per unit of newly built capacity",
    ),
    ParameterSpec::float(
        "output_cap_new",
        &["node_loc", "tec", "year_vtg", "node_dest", "commodity", "level", "time_dest"],
        "Output per unit of newly built capacity",
    ),
    ParameterSpec::float(
        "input_cap_ret",
        &["node_loc", "tec", "year_vtg", "node_origin", "commodity", "level", "time_origin"],
        "Input associated with retired capacity",
    ),
    ParameterSpec::float(
        "output_cap_ret",
        &["node_loc", "tec", "year_vtg", "node_dest", "commodity", "level", "time_dest"],
        "Output associated with retired capacity",
    ),
    // Technical Performance
    ParameterSpec::float(
        "capacity_factor",
        &["node_loc", "tec", "year_vtg", "year_act", "time"],
        "Maximum utilization rate of capacity in a given time slice",
    ),
    ParameterSpec::float(
        "operation_factor",
        &["node_loc", "tec", "year_vtg", "year_act"],
        "Fraction of the year the technology can operate",
    ),
    ParameterSpec::float(
        "min_utilization_factor",
        &["node_loc", "tec", "year_vtg", "year_act"],
        "Minimum utilization requirement for installed capacity",
    ),
    ParameterSpec::float(
        "technical_lifetime",
        &["node_loc", "tec", "year_vtg"],
        "Lifetime of a technology before retirement",
    ),
    ParameterSpec::float(
        "construction_time",
        &["node_loc", "tec", "year_vtg"],
        "Time delay between investment and availability",
    ),
    ParameterSpec::float(
        "rating_bin",
        &["node", "tec", "year_act", "commodity", "level", "time", "rating"],
        "Share of output assigned to a reliability rating bin",
    ),
    ParameterSpec::float(
        "reliability_factor",
        &["node", "tec", "year_act", "commodity", "level", "time", "rating"],
        "Contribution of a rating bin to firm capacity",
    ),
    ParameterSpec::float(
        "flexibility_factor",
        &["node_loc", "tec", "year_vtg", "year_act", "mode", "commodity", "level", "time", "rating"],
        "Contribution of a technology to system flexibility",
    ),
    ParameterSpec::float(
        "addon_conversion",
        &["node", "tec", "year_vtg", "year_act", "mode", "time", "type_addon"],
        "Conversion factor for add-on technologies",
    ),
    ParameterSpec::float(
        "addon_up",
        &["node", "tec", "year_act", "mode", "time", "type_addon"],
        "Upper bound on add-on technology relative to parent",
    ),
    ParameterSpec::float(
        "addon_lo",
        &["node", "tec", "year_act", "mode", "time", "type_addon"],
        "Lower bound on add-on technology relative to parent",
    ),
    ParameterSpec::float(
        "storage_initial",
        &["node", "tec", "level", "commodity", "year_act", "time"],
        "Initial storage level",
    ),
    ParameterSpec::float(
        "storage_self_discharge",
        &["node", "tec", "level", "commodity", "year_act", "time"],
        "Fraction of stored energy lost per time slice",
    ),
    ParameterSpec::float(
        "time_order",
        &["lvl_temporal", "time"],
        "Ordering of subannual time slices",
    ),
    ParameterSpec::float(
        "renewable_capacity_factor",
        &["node_loc", "commodity", "grade", "level", "year"],
        "Quality of renewable potential by grade",
    ),
    ParameterSpec::float(
        "renewable_potential",
        &["node", "commodity", "grade", "level", "year"],
        "Size of renewable potential per grade",
    ),
    // Cost and Economic
    ParameterSpec::float(
        "inv_cost",
        &["node_loc", "tec", "year_vtg"],
        "Investment cost per unit of new capacity",
    ),
    ParameterSpec::float(
        "fix_cost",
        &["node_loc", "tec", "year_vtg", "year_act"],
        "Fixed O&M cost per unit of capacity",
    ),
    ParameterSpec::float(
        "var_cost",
        &["node_loc", "tec", "year_vtg", "year_act", "mode", "time"],
        "Variable cost per unit of activity",
    ),
    ParameterSpec::float(
        "levelized_cost",
        &["node_loc", "tec", "year_vtg", "time"],
        "Exogenously specified levelized cost",
    ),
    ParameterSpec::float(
        "construction_time_factor",
        &["node", "tec", "year"],
        "Capital cost weighting during construction",
    ),
    ParameterSpec::float(
        "remaining_capacity",
        &["node", "tec", "year"],
        "Fraction of capacity remaining from earlier vintages",
    ),
    ParameterSpec::float(
        "remaining_capacity_extended",
        &["node", "tec", "year"],
        "Extended formulation of remaining capacity",
    ),
    ParameterSpec::float(
        "end_of_horizon_factor",
        &["node", "tec", "year"],
        "Salvage value factor at model horizon",
    ),
    ParameterSpec::float(
        "beyond_horizon_lifetime",
        &["node", "tec", "year"],
        "Remaining lifetime beyond model horizon",
    ),
    ParameterSpec::float(
        "beyond_horizon_factor",
        &["node", "tec", "year"],
        "Discount factor for post-horizon capacity",
    ),
    // Capacity and Activity Bounds
    ParameterSpec::float(
        "bound_new_capacity_up",
        &["node_loc", "tec", "year_vtg"],
        "Upper bound on new capacity additions",
    ),
    ParameterSpec::float(
        "bound_new_capacity_lo",
        &["node_loc", "tec", "year_vtg"],
        "Lower bound on new capacity additions",
    ),
    ParameterSpec::float(
        "bound_total_capacity_up",
        &["node_loc", "tec", "year_act"],
        "Upper bound on total installed capacity",
    ),
    ParameterSpec::float(
        "bound_total_capacity_lo",
        &["node_loc", "tec", "year_act"],
        "Lower bound on total installed capacity",
    ),
    ParameterSpec::float(
        "bound_activity_up",
        &["node_loc", "tec", "year_act", "mode", "time"],
        "Upper bound on activity",
    ),
    ParameterSpec::float(
        "bound_activity_lo",
        &["node_loc", "tec", "year_act", "mode", "time"],
        "Lower bound on activity",
    ),
    // Dynamic Growth Constraints
    ParameterSpec::float(
        "initial_new_capacity_up",
        &["node_loc", "tec", "year_vtg"],
        "Initial upper bound on new capacity",
    ),
    ParameterSpec::float(
        "growth_new_capacity_up",
        &["node_loc", "tec", "year_vtg"],
        "Growth rate limit for new capacity (up)",
    ),
    ParameterSpec::float(
        "initial_new_capacity_lo",
        &["node_loc", "tec", "year_vtg"],
        "Initial lower bound on new capacity",
    ),
    ParameterSpec::float(
        "growth_new_capacity_lo",
        &["node_loc", "tec", "year_vtg"],
        "Growth rate limit for new capacity (down)",
    ),
    ParameterSpec::float(
        "initial_activity_up",
        &["node_loc", "tec", "year_act", "time"],
        "Initial activity upper bound",
    ),
    ParameterSpec::float(
        "growth_activity_up",
        &["node_loc", "tec", "year_act", "time"],
        "Activity growth limit (up)",
    ),
    ParameterSpec::float(
        "initial_activity_lo",
        &["node_loc", "tec", "year_act", "time"],
        "Initial activity lower bound",
    ),
    ParameterSpec::float(
        "growth_activity_lo",
        &["node_loc", "tec", "year_act", "time"],
        "Activity growth limit (down)",
    ),
    // Soft Constraints
    ParameterSpec::float(
        "soft_new_capacity_up",
        &["node_loc", "tec", "year_vtg"],
        "Soft upper bound on new capacity",
    ),
    ParameterSpec::float(
        "soft_new_capacity_lo",
        &["node_loc", "tec", "year_vtg"],
        "Soft lower bound on new capacity",
    ),
    ParameterSpec::float(
        "soft_activity_up",
        &["node_loc", "tec", "year_act", "time"],
        "Soft upper bound on activity",
    ),
    ParameterSpec::float(
        "soft_activity_lo",
        &["node_loc", "tec", "year_act", "time"],
        "Soft lower bound on activity",
    ),
    ParameterSpec::float(
        "abs_cost_new_capacity_soft_up",
        &["node_loc", "tec", "year_vtg"],
        "Absolute penalty for violating new-capacity upper bound",
    ),
    ParameterSpec::float(
        "level_cost_new_capacity_soft_up",
        &["node_loc", "tec", "year_vtg"],
        "Marginal penalty for new-capacity upper bound",
    ),
    ParameterSpec::float(
        "abs_cost_activity_soft_up",
        &["node_loc", "tec", "year_act", "time"],
        "Absolute penalty for activity upper bound",
    ),
    ParameterSpec::float(
        "level_cost_activity_soft_up",
        &["node_loc", "tec", "year_act", "time"],
        "Marginal penalty for activity upper bound",
    ),
    ParameterSpec::float(
        "abs_cost_new_capacity_soft_lo",
        &["node_loc", "tec", "year_vtg"],
        "Absolute cost for relaxing lower bound on new capacity",
    ),
    ParameterSpec::float(
        "level_cost_new_capacity_soft_lo",
        &["node_loc", "tec", "year_vtg"],
        "Levelized cost for relaxing lower bound on new capacity",
    ),
    ParameterSpec::float(
        "abs_cost_activity_soft_lo",
        &["node_loc", "tec", "year_act", "time"],
        "Absolute cost for relaxing lower bound on activity",
    ),
    ParameterSpec::float(
        "level_cost_activity_soft_lo",
        &["node_loc", "tec", "year_act", "time"],
        "Levelized cost for relaxing lower bound on activity",
    ),
    // Emissions
    ParameterSpec::float(
        "emission_factor",
        &["node_loc", "tec", "year_vtg", "year_act", "mode", "emission"],
        "Emissions per unit of activity",
    ),
    // Emissions Policy
    ParameterSpec::float(
        "historical_emission",
        &["node", "emission", "type_tec", "year"],
        "Exogenous historical emissions",
    ),
    ParameterSpec::float(
        "emission_scaling",
        &["type_emission", "emission"],
        "Scaling factor for emissions aggregation",
    ),
    ParameterSpec::float(
        "bound_emission",
        &["node", "type_emission", "type_tec", "type_year"],
        "Emissions cap",
    ),
    ParameterSpec::float(
        "tax_emission",
        &["node", "type_emission", "type_tec", "type_year"],
        "Emissions tax",
    ),
    // Resources & Extraction
    ParameterSpec::float(
        "resource_volume",
        &["node", "commodity", "grade"],
        "Total available resource",
    ),
    ParameterSpec::float(
        "resource_cost",
        &["node", "commodity", "grade", "year"],
        "Extraction cost",
    ),
    ParameterSpec::float(
        "resource_remaining",
        &["node", "commodity", "grade", "year"],
        "Remaining resource stock",
    ),
    ParameterSpec::float(
        "bound_extraction_up",
        &["node", "commodity", "level", "year"],
        "Upper bound on extraction",
    ),
    ParameterSpec::float(
        "commodity_stock",
        &["node", "commodity", "level", "year"],
        "Stock of commodity",
    ),
    ParameterSpec::float(
        "historical_extraction",
        &["node", "commodity", "grade", "year"],
        "Historical extraction levels",
    ),
    // Demand & Load
    ParameterSpec::float(
        "demand",
        &["node", "commodity", "level", "year", "time"],
        "Exogenous final demand",
    ),
    ParameterSpec::float(
        "peak_load_factor",
        &["node", "commodity", "year"],
        "Ratio of peak to average load",
    ),
    // Land-Use
    ParameterSpec::float(
        "historical_land",
        &["node", "land_scenario", "year"],
        "Historical land allocation",
    ),
    ParameterSpec::float("land_cost", &["node", "land_scenario", "year"], "Cost of land use"),
    ParameterSpec::float(
        "land_input",
        &["node", "land_scenario", "year", "commodity", "level", "time"],
        "Inputs to land system",
    ),
    ParameterSpec::float(
        "land_output",
        &["node", "land_scenario", "year", "commodity", "level", "time"],
        "Outputs from land system",
    ),
    ParameterSpec::float(
        "land_use",
        &["node", "land_scenario", "year", "land_type"],
        "Land allocation by type",
    ),
    ParameterSpec::float(
        "land_emission",
        &["node", "land_scenario", "year", "emission"],
        "Emissions from land use",
    ),
    ParameterSpec::float(
        "initial_land_up",
        &["node", "year", "land_type"],
        "Initial land upper bound",
    ),
    ParameterSpec::float(
        "initial_land_lo",
        &["node", "year", "land_type"],
        "Initial land lower bound",
    ),
    ParameterSpec::float(
        "growth_land_up",
        &["node", "year", "land_type"],
        "Land growth limit (up)",
    ),
    ParameterSpec::float(
        "growth_land_lo",
        &["node", "year", "land_type"],
        "Land growth limit (down)",
    ),
    // Share Constraints
    ParameterSpec::float(
        "share_commodity_up",
        &["shares", "node_share", "year_act", "time"],
        "Upper bound on commodity share",
    ),
    ParameterSpec::float(
        "share_commodity_lo",
        &["shares", "node", "year_act", "time"],
        "Lower bound on commodity share",
    ),
    ParameterSpec::float(
        "share_mode_up",
        &["shares", "node_loc", "tec", "mode", "year_act", "time"],
        "Upper bound on mode share",
    ),
    ParameterSpec::float(
        "share_mode_lo",
        &["shares", "node_loc", "tec", "mode", "year_act", "time"],
        "Lower bound on mode share",
    ),
    // Generic Relations
    ParameterSpec::float(
        "relation_upper",
        &["relation", "node_rel", "year_rel"],
        "Upper bound on relation",
    ),
    ParameterSpec::float(
        "relation_lower",
        &["relation", "node_rel", "year_rel"],
        "Lower bound on relation",
    ),
    ParameterSpec::float(
        "relation_cost",
        &["relation", "node_rel", "year_rel"],
        "Cost of relation slack",
    ),
    ParameterSpec::float(
        "relation_new_capacity",
        &["relation", "node_rel", "year_rel", "tec"],
        "Capacity term in relation",
    ),
    ParameterSpec::float(
        "relation_total_capacity",
        &["relation", "node_rel", "year_rel", "tec"],
        "Total capacity term",
    ),
    ParameterSpec::float(
        "relation_activity",
        &["relation", "node_rel", "year_rel", "node_loc", "tec", "year_act", "mode"],
        "Activity term",
    ),
    // Fixed Variables
    ParameterSpec::float(
        "fixed_extraction",
        &["node", "commodity", "grade", "year"],
        "Fixed extraction level",
    ),
    ParameterSpec::float(
        "fixed_stock",
        &["node", "commodity", "level", "year"],
        "Fixed stock level",
    ),
    ParameterSpec::float("fixed_new_capacity", &["node", "tec", "year_vtg"], "Fixed new capacity"),
    ParameterSpec::float(
        "fixed_capacity",
        &["node", "tec", "year_vtg", "year_act"],
        "Fixed installed capacity",
    ),
    ParameterSpec::float(
        "fixed_activity",
        &["node", "tec", "year_vtg", "year_act", "mode", "time"],
        "Fixed activity",
    ),
    ParameterSpec::float("fixed_land", &["node", "land_scenario", "year"], "Fixed land allocation"),
    // Historical Data
    ParameterSpec::float(
        "historical_new_capacity",
        &["node_loc", "tec", "year_vtg"],
        "Historical new capacity additions",
    ),
    ParameterSpec::float(
        "historical_activity",
        &["node_loc", "tec", "year_act", "mode", "time"],
        "Historical activity levels",
    ),
    // Reporting
    ParameterSpec::float(
        "total_cost",
        &["node", "year"],
        "Total system cost including trade and emission taxes",
    ),
    ParameterSpec::float(
        "trade_cost",
        &["node", "year"],
        "Net cost from trade (exports minus imports)",
    ),
    ParameterSpec::float(
        "import_cost",
        &["node", "commodity", "year"],
        "Cost from importing commodities",
    ),
    ParameterSpec::float(
        "export_cost",
        &["node", "commodity", "year"],
        "Revenue from exporting commodities",
    ),
];

pub(crate) static CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Core Technology Input–Output",
        &[
            "input",
            "output",
            "input_cap",
            "output_cap",
            "input_cap_new",
            "output_cap_new",
            "input_cap_ret",
            "output_cap_ret",
        ],
    ),
    (
        "Technical Performance",
        &[
            "capacity_factor",
            "operation_factor",
            "min_utilization_factor",
            "technical_lifetime",
            "construction_time",
            "rating_bin",
            "reliability_factor",
            "flexibility_factor",
            "addon_conversion",
            "addon_up",
            "addon_lo",
            "storage_initial",
            "storage_self_discharge",
            "time_order",
            "renewable_capacity_factor",
            "renewable_potential",
        ],
    ),
    (
        "Cost and Economic",
        &[
            "inv_cost",
            "fix_cost",
            "var_cost",
            "levelized_cost",
            "construction_time_factor",
            "remaining_capacity",
            "remaining_capacity_extended",
            "end_of_horizon_factor",
            "beyond_horizon_lifetime",
            "beyond_horizon_factor",
        ],
    ),
    (
        "Capacity and Activity Bounds",
        &[
            "bound_new_capacity_up",
            "bound_new_capacity_lo",
            "bound_total_capacity_up",
            "bound_total_capacity_lo",
            "bound_activity_up",
            "bound_activity_lo",
        ],
    ),
    (
        "Dynamic Growth Constraints",
        &[
            "initial_new_capacity_up",
            "growth_new_capacity_up",
            "initial_new_capacity_lo",
            "growth_new_capacity_lo",
            "initial_activity_up",
            "growth_activity_up",
            "initial_activity_lo",
            "growth_activity_lo",
        ],
    ),
    (
        "Soft Constraints",
        &[
            "soft_new_capacity_up",
            "soft_new_capacity_lo",
            "soft_activity_up",
            "soft_activity_lo",
            "abs_cost_new_capacity_soft_up",
            "level_cost_new_capacity_soft_up",
            "abs_cost_activity_soft_up",
            "level_cost_activity_soft_up",
            "abs_cost_new_capacity_soft_lo",
            "level_cost_new_capacity_soft_lo",
            "abs_cost_activity_soft_lo",
            "level_cost_activity_soft_lo",
        ],
    ),
    (
        "Emissions",
        &[
            "emission_factor",
        ],
    ),
    (
        "Emissions Policy",
        &[
            "historical_emission",
            "emission_scaling",
            "bound_emission",
            "tax_emission",
        ],
    ),
    (
        "Resources & Extraction",
        &[
            "resource_volume",
            "resource_cost",
            "resource_remaining",
            "bound_extraction_up",
            "commodity_stock",
            "historical_extraction",
        ],
    ),
    (
        "Demand & Load",
        &[
            "demand",
            "peak_load_factor",
        ],
    ),
    (
        "Land-Use",
        &[
            "historical_land",
            "land_cost",
            "land_input",
            "land_output",
            "land_use",
            "land_emission",
            "initial_land_up",
            "initial_land_lo",
            "growth_land_up",
            "growth_land_lo",
        ],
    ),
    (
        "Share Constraints",
        &[
            "share_commodity_up",
            "share_commodity_lo",
            "share_mode_up",
            "share_mode_lo",
        ],
    ),
    (
        "Generic Relations",
        &[
            "relation_upper",
            "relation_lower",
            "relation_cost",
            "relation_new_capacity",
            "relation_total_capacity",
            "relation_activity",
        ],
    ),
    (
        "Fixed Variables",
        &[
            "fixed_extraction",
            "fixed_stock",
            "fixed_new_capacity",
            "fixed_capacity",
            "fixed_activity",
            "fixed_land",
        ],
    ),
    (
        "Historical Data",
        &[
            "historical_new_capacity",
            "historical_activity",
        ],
    ),
    (
        "Reporting",
        &[
            "total_cost",
            "trade_cost",
            "import_cost",
            "export_cost",
        ],
    ),
];
