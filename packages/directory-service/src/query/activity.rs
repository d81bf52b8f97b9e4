use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use directory_domain::ActivitySelection;

/// Renders an existence test over the organization's activities. Level `0` is the selected
/// activity itself and level `n` reaches activities `n` generations below it.
pub(super) fn push_sql(
	selection: &ActivitySelection,
	builder: &mut QueryBuilder<'static, Postgres>,
) {
	builder.push(
		"EXISTS (SELECT 1 FROM organization_activities oa_f \
		 JOIN activities a ON a.activity_id = oa_f.activity_id \
		 WHERE oa_f.organization_id = o.organization_id AND (a.activity_id = ",
	);
	builder.push_bind(selection.activity_id);

	for level in 1..=selection.depth() {
		builder.push(" OR ");

		push_level(selection.activity_id, level, builder);
	}

	builder.push("))");
}

fn push_level(activity_id: Uuid, level: usize, builder: &mut QueryBuilder<'static, Postgres>) {
	builder.push("a.parent_id ");

	for generation in (1..level).rev() {
		builder.push(format!(
			"IN (SELECT g{generation}.activity_id FROM activities g{generation} \
			 WHERE g{generation}.parent_id "
		));
	}

	builder.push("= ");
	builder.push_bind(activity_id);

	for _ in 1..level {
		builder.push(")");
	}
}
