//! Common source fixtures.

pub const SALE_ORDER: &str = r#"from odoo import fields, models


class SaleOrder(models.Model):
    _name = 'sale.order'
    _description = 'Sales Order'

    name = fields.Char(required=True)
    partner_id = fields.Many2one('res.partner')

    def action_confirm(self):
        return True
"#;

pub const SALE_ORDER_EXTENDED: &str = r#"from odoo import fields, models


class SaleOrder(models.Model):
    _inherit = 'sale.order'

    priority = fields.Selection([('0', 'Normal'), ('1', 'Urgent')])

    def action_confirm(self):
        res = super().action_confirm()
        return res
"#;

pub const RES_PARTNER: &str = r#"from odoo import fields, models


class Partner(models.Model):
    _name = 'res.partner'
    _description = 'Contact'

    name = fields.Char()
"#;

pub const RES_USERS: &str = r#"from odoo import fields, models


class Users(models.Model):
    _name = 'res.users'
    _inherits = {'res.partner': 'partner_id'}

    partner_id = fields.Many2one('res.partner', required=True)
"#;
